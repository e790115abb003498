//! Mock transcoder for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::transcode::{TranscodeError, TranscodeJob, TranscodeResult, Transcoder};

/// A recorded transcode job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    /// The job that was submitted.
    pub job: TranscodeJob,
    /// Whether the transcode succeeded.
    pub success: bool,
}

/// Mock implementation of the [`Transcoder`] trait.
///
/// Records every job for assertions and, by default, writes a small stub
/// file at the job's output path so on-disk expectations (and real
/// archivers) can be exercised. Failure can be injected for a specific
/// chapter index or queued as a one-shot error.
#[derive(Debug, Clone)]
pub struct MockTranscoder {
    jobs: Arc<RwLock<Vec<RecordedTranscode>>>,
    fail_at_index: Arc<RwLock<Option<usize>>>,
    next_error: Arc<RwLock<Option<TranscodeError>>>,
    write_output: Arc<RwLock<bool>>,
}

impl Default for MockTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(Vec::new())),
            fail_at_index: Arc::new(RwLock::new(None)),
            next_error: Arc::new(RwLock::new(None)),
            write_output: Arc::new(RwLock::new(true)),
        }
    }

    /// Get all recorded jobs, in submission order.
    pub async fn recorded_jobs(&self) -> Vec<RecordedTranscode> {
        self.jobs.read().await.clone()
    }

    /// Get the number of transcodes attempted.
    pub async fn transcode_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Fail the job carrying the given chapter index.
    pub async fn set_fail_at_index(&self, index: usize) {
        *self.fail_at_index.write().await = Some(index);
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: TranscodeError) {
        *self.next_error.write().await = Some(error);
    }

    /// Enable or disable writing stub output files.
    pub async fn set_write_output(&self, write: bool) {
        *self.write_output.write().await = write;
    }

    async fn take_error(&self) -> Option<TranscodeError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError> {
        if let Some(err) = self.take_error().await {
            self.jobs.write().await.push(RecordedTranscode {
                job,
                success: false,
            });
            return Err(err);
        }

        if *self.fail_at_index.read().await == Some(job.chapter.index) {
            let chapter_index = job.chapter.index;
            self.jobs.write().await.push(RecordedTranscode {
                job,
                success: false,
            });
            return Err(TranscodeError::ChapterFailed {
                chapter_index,
                stderr: "simulated encoder failure".to_string(),
            });
        }

        let output_path = job.output_path();
        let mut output_size_bytes = 0;
        if *self.write_output.read().await {
            let stub = format!("audio:{}\n", job.chapter.title);
            output_size_bytes = stub.len() as u64;
            tokio::fs::create_dir_all(&job.output_dir).await.map_err(|e| {
                TranscodeError::OutputDirFailed {
                    path: job.output_dir.clone(),
                    source: e,
                }
            })?;
            tokio::fs::write(&output_path, stub).await?;
        }

        let chapter_index = job.chapter.index;
        self.jobs.write().await.push(RecordedTranscode {
            job,
            success: true,
        });

        Ok(TranscodeResult {
            chapter_index,
            output_path,
            output_size_bytes,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(())
    }
}
