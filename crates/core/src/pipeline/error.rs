//! Error types for the pipeline module.

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::probe::ProbeError;
use crate::transcode::TranscodeError;

/// Errors surfaced by the conversion pipeline.
///
/// Every failure aborts the remainder of the run immediately; there are no
/// retries and no rollback of already-written chapter files.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Chapter discovery failed.
    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// A chapter extraction failed.
    #[error("transcode failed: {0}")]
    Transcode(#[from] TranscodeError),

    /// Packaging the output directory failed.
    #[error("archive failed: {0}")]
    Archive(#[from] ArchiveError),
}
