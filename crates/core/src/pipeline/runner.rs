//! Sequential pipeline runner.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::archive::Archiver;
use crate::probe::Prober;
use crate::transcode::{TranscodeJob, Transcoder};

use super::error::PipelineError;
use super::types::{ConversionOutcome, ConversionRequest};

/// Drives probe → per-chapter transcode → archive for one container.
///
/// Chapters are processed strictly in ascending index order on a single
/// logical worker: each transcode decodes the container from its seek point,
/// so running them in parallel would multiply decoder work for no ordering
/// benefit. The first failure aborts the run; files already written stay on
/// disk for the caller to inspect or clean up.
///
/// Separate pipeline invocations share no mutable state and may run
/// concurrently, as long as they do not target the same output directory.
pub struct ConversionPipeline<P, T, A> {
    prober: Arc<P>,
    transcoder: Arc<T>,
    archiver: Arc<A>,
}

impl<P, T, A> ConversionPipeline<P, T, A>
where
    P: Prober,
    T: Transcoder,
    A: Archiver,
{
    /// Creates a pipeline from its three capabilities.
    pub fn new(prober: P, transcoder: T, archiver: A) -> Self {
        Self {
            prober: Arc::new(prober),
            transcoder: Arc::new(transcoder),
            archiver: Arc::new(archiver),
        }
    }

    /// Probes the container and transcodes every chapter, returning the
    /// produced file paths in chapter order.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let chapters = self
            .prober
            .probe_chapters(&request.container, &request.key)
            .await?;

        info!(
            chapters = chapters.len(),
            container = %request.container.display(),
            "probed container"
        );

        let mut produced = Vec::with_capacity(chapters.len());
        for chapter in chapters {
            let job = TranscodeJob {
                container: request.container.clone(),
                key: request.key.clone(),
                chapter,
                output_dir: request.output_dir.clone(),
                profile: request.profile.clone(),
            };
            let result = self.transcoder.transcode(job).await?;
            produced.push(result.output_path);
        }

        Ok(produced)
    }

    /// The full control flow: convert every chapter, then pack the output
    /// directory into `archive_path`. Archiving only runs once every
    /// chapter has succeeded.
    pub async fn convert_and_archive(
        &self,
        request: &ConversionRequest,
        archive_path: &Path,
    ) -> Result<ConversionOutcome, PipelineError> {
        let chapter_files = self.convert(request).await?;
        let archive = self
            .archiver
            .archive(&request.output_dir, archive_path)
            .await?;

        info!(
            members = archive.member_count,
            archive = %archive.archive_path.display(),
            "archive written"
        );

        Ok(ConversionOutcome {
            chapter_files,
            archive,
        })
    }

    /// Checks that every injected capability is ready.
    pub async fn validate(&self) -> Result<(), PipelineError> {
        self.prober.validate().await?;
        self.transcoder.validate().await?;
        Ok(())
    }
}
