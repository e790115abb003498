//! Trait definitions for the probe module.

use async_trait::async_trait;
use std::path::Path;

use crate::key::ActivationBytes;

use super::error::ProbeError;
use super::types::Chapter;

/// A prober that can enumerate the chapters of a protected container.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Returns the name of this prober implementation.
    fn name(&self) -> &str;

    /// Reads the ordered chapter list of a container.
    ///
    /// Implementations return chapters in ascending `index` order with
    /// non-decreasing start times, and manufacture a single full-length
    /// chapter for containers that expose none.
    async fn probe_chapters(
        &self,
        container: &Path,
        key: &ActivationBytes,
    ) -> Result<Vec<Chapter>, ProbeError>;

    /// Validates that the prober is properly configured and ready.
    async fn validate(&self) -> Result<(), ProbeError>;
}
