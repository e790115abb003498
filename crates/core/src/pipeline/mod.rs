//! The conversion pipeline: probe → per-chapter transcode → archive.
//!
//! The pipeline is generic over its three injected capabilities so the
//! orchestration can be exercised with the mock implementations in
//! [`crate::testing`] without invoking real external binaries.
//!
//! # Example
//!
//! ```ignore
//! use chapterino_core::pipeline::{ConversionPipeline, ConversionRequest};
//! use chapterino_core::{FfprobeProber, FfmpegTranscoder, ZipArchiver};
//!
//! let pipeline = ConversionPipeline::new(
//!     FfprobeProber::new(tools.clone()),
//!     FfmpegTranscoder::new(tools),
//!     ZipArchiver::new(),
//! );
//!
//! let outcome = pipeline
//!     .convert_and_archive(&request, Path::new("book_chapters_mp3.zip"))
//!     .await?;
//! println!("{} chapters archived", outcome.chapter_files.len());
//! ```

mod error;
mod runner;
mod types;

pub use error::PipelineError;
pub use runner::ConversionPipeline;
pub use types::{ConversionOutcome, ConversionRequest};
