//! Types for the archive module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a successful archive run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSummary {
    /// Path of the written archive.
    pub archive_path: PathBuf,
    /// Number of members packed into the archive.
    pub member_count: usize,
    /// Uncompressed bytes consumed from the source directory.
    pub total_bytes: u64,
}
