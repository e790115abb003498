//! Error types for the probe module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering chapters.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Container file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// FFprobe binary not found.
    #[error("FFprobe not found at path: {tool}")]
    ToolMissing { tool: PathBuf },

    /// Inspection process exited non-zero.
    #[error("ffprobe failed: {stderr}")]
    Failed { stderr: String },

    /// Structured output was malformed or inconsistent.
    #[error("Failed to parse chapter metadata: {reason}")]
    InvalidOutput { reason: String },

    /// I/O error while running the probe.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
