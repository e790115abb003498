//! Mock prober for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::key::ActivationBytes;
use crate::probe::{Chapter, ProbeError, Prober};

/// Mock implementation of the [`Prober`] trait.
///
/// Returns a canned chapter list (a single full-length chapter by default)
/// and records every probed container for assertions. A queued error is
/// consumed by the next call.
#[derive(Debug, Clone)]
pub struct MockProber {
    chapters: Arc<RwLock<Vec<Chapter>>>,
    probed: Arc<RwLock<Vec<PathBuf>>>,
    next_error: Arc<RwLock<Option<ProbeError>>>,
}

impl Default for MockProber {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProber {
    /// Create a new mock prober.
    pub fn new() -> Self {
        Self {
            chapters: Arc::new(RwLock::new(vec![Chapter::whole_stream()])),
            probed: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the chapter list returned by subsequent probes.
    pub async fn set_chapters(&self, chapters: Vec<Chapter>) {
        *self.chapters.write().await = chapters;
    }

    /// Configure the next probe to fail with the given error.
    pub async fn set_next_error(&self, error: ProbeError) {
        *self.next_error.write().await = Some(error);
    }

    /// Containers probed so far, in call order.
    pub async fn probed_containers(&self) -> Vec<PathBuf> {
        self.probed.read().await.clone()
    }

    async fn take_error(&self) -> Option<ProbeError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Prober for MockProber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe_chapters(
        &self,
        container: &Path,
        _key: &ActivationBytes,
    ) -> Result<Vec<Chapter>, ProbeError> {
        self.probed.write().await.push(container.to_path_buf());

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.chapters.read().await.clone())
    }

    async fn validate(&self) -> Result<(), ProbeError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(())
    }
}
