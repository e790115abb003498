//! Types for the pipeline module.

use std::path::PathBuf;

use crate::archive::ArchiveSummary;
use crate::key::ActivationBytes;
use crate::transcode::OutputProfile;

/// Everything one container conversion needs, supplied explicitly by the
/// caller; the pipeline never reads ambient state.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Protected container to convert.
    pub container: PathBuf,
    /// Decryption key, already validated at the boundary.
    pub key: ActivationBytes,
    /// Directory the chapter files are written into (created if absent).
    pub output_dir: PathBuf,
    /// Target codec and quality.
    pub profile: OutputProfile,
}

/// Produced chapter files plus the archive wrapping them.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// One file per chapter, in chapter order.
    pub chapter_files: Vec<PathBuf>,
    /// Summary of the written archive.
    pub archive: ArchiveSummary,
}
