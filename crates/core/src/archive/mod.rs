//! Packaging of a completed output directory into a single archive.
//!
//! This module provides the `Archiver` trait and the zip-backed
//! implementation. Archives always reflect the current directory state:
//! a stale archive at the destination is replaced, never appended to, and
//! identical directory contents produce byte-identical archives.

mod error;
mod traits;
mod types;
mod zip_archiver;

pub use error::ArchiveError;
pub use traits::Archiver;
pub use types::ArchiveSummary;
pub use zip_archiver::ZipArchiver;
