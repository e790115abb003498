//! Trait definitions for the archive module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ArchiveError;
use super::types::ArchiveSummary;

/// An archiver that packs a directory into a single file.
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Returns the name of this archiver implementation.
    fn name(&self) -> &str;

    /// Packs the files of `source_dir` into one archive at `dest`.
    ///
    /// A pre-existing archive at `dest` is replaced; the result always
    /// reflects the directory's current contents.
    async fn archive(&self, source_dir: &Path, dest: &Path)
        -> Result<ArchiveSummary, ArchiveError>;
}
