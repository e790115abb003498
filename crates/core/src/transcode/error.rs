//! Error types for the transcode module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting a chapter.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {tool}")]
    ToolMissing { tool: PathBuf },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transcode process exited non-zero for one chapter.
    #[error("ffmpeg failed for chapter {chapter_index}: {stderr}")]
    ChapterFailed { chapter_index: usize, stderr: String },

    /// I/O error during the transcode.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
