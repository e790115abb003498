//! Error types for the archive module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging the output directory.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Source directory missing or unreadable.
    #[error("Archive source is not a readable directory: {path}")]
    SourceInvalid { path: PathBuf },

    /// Archive could not be written.
    #[error("Failed to write archive {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

impl ArchiveError {
    /// Creates a write failure for the given destination.
    pub fn write_failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::WriteFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
