//! Mock archiver for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::archive::{ArchiveError, ArchiveSummary, Archiver};

/// Mock implementation of the [`Archiver`] trait.
///
/// Records every (source, dest) pair without writing an archive; the
/// returned summary counts the files actually present in the source
/// directory.
#[derive(Debug, Clone, Default)]
pub struct MockArchiver {
    calls: Arc<RwLock<Vec<(PathBuf, PathBuf)>>>,
    next_error: Arc<RwLock<Option<ArchiveError>>>,
}

impl MockArchiver {
    /// Create a new mock archiver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded (source, dest) calls.
    pub async fn recorded_calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.read().await.clone()
    }

    /// Get the number of archive calls.
    pub async fn archive_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ArchiveError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Archiver for MockArchiver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn archive(
        &self,
        source_dir: &Path,
        dest: &Path,
    ) -> Result<ArchiveSummary, ArchiveError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.calls
            .write()
            .await
            .push((source_dir.to_path_buf(), dest.to_path_buf()));

        let member_count = std::fs::read_dir(source_dir)
            .map(|entries| entries.filter_map(|e| e.ok()).count())
            .unwrap_or(0);

        Ok(ArchiveSummary {
            archive_path: dest.to_path_buf(),
            member_count,
            total_bytes: 0,
        })
    }
}
