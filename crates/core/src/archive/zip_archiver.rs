//! Zip-based archiver implementation.

use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::error::ArchiveError;
use super::traits::Archiver;
use super::types::ArchiveSummary;

/// Packs the output directory into a flat, deflate-compressed zip.
#[derive(Debug, Clone, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    /// Creates a new zip archiver.
    pub fn new() -> Self {
        Self
    }

    fn write_zip(source_dir: &Path, dest: &Path) -> Result<ArchiveSummary, ArchiveError> {
        let mut members: Vec<PathBuf> = std::fs::read_dir(source_dir)
            .map_err(|_| ArchiveError::SourceInvalid {
                path: source_dir.to_path_buf(),
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        // Deterministic member order regardless of filesystem enumeration.
        members.sort();

        if dest.exists() {
            std::fs::remove_file(dest)
                .map_err(|e| ArchiveError::write_failed(dest, format!("stale archive: {}", e)))?;
        }

        let file = File::create(dest).map_err(|e| ArchiveError::write_failed(dest, e))?;
        let mut writer = ZipWriter::new(file);
        // A fixed member timestamp keeps identical directory contents
        // byte-identical across runs.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut total_bytes = 0u64;
        let member_count = members.len();
        for path in members {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    ArchiveError::write_failed(
                        dest,
                        format!("non UTF-8 member name under {}", source_dir.display()),
                    )
                })?;

            writer
                .start_file(name, options)
                .map_err(|e| ArchiveError::write_failed(dest, e))?;
            let mut member = File::open(&path).map_err(|e| ArchiveError::write_failed(dest, e))?;
            total_bytes += std::io::copy(&mut member, &mut writer)
                .map_err(|e| ArchiveError::write_failed(dest, e))?;
        }

        writer
            .finish()
            .map_err(|e| ArchiveError::write_failed(dest, e))?;

        Ok(ArchiveSummary {
            archive_path: dest.to_path_buf(),
            member_count,
            total_bytes,
        })
    }
}

#[async_trait]
impl Archiver for ZipArchiver {
    fn name(&self) -> &str {
        "zip"
    }

    async fn archive(
        &self,
        source_dir: &Path,
        dest: &Path,
    ) -> Result<ArchiveSummary, ArchiveError> {
        if !source_dir.is_dir() {
            return Err(ArchiveError::SourceInvalid {
                path: source_dir.to_path_buf(),
            });
        }

        debug!(
            source = %source_dir.display(),
            dest = %dest.display(),
            "writing archive"
        );

        let source_dir = source_dir.to_path_buf();
        let dest_path = dest.to_path_buf();
        tokio::task::spawn_blocking(move || Self::write_zip(&source_dir, &dest_path))
            .await
            .map_err(|e| ArchiveError::write_failed(dest, format!("archive task failed: {}", e)))?
    }
}
