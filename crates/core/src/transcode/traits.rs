//! Trait definitions for the transcode module.

use async_trait::async_trait;

use super::error::TranscodeError;
use super::types::{TranscodeJob, TranscodeResult};

/// A transcoder that can extract one chapter into one audio file.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Extracts the job's chapter, writing exactly one file at
    /// [`TranscodeJob::output_path`].
    ///
    /// Failures identify the chapter so a run can be explained without
    /// re-executing it; implementations never touch other chapters' output.
    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError>;

    /// Validates that the transcoder is properly configured and ready.
    async fn validate(&self) -> Result<(), TranscodeError>;
}
