//! Per-chapter transcoding of protected containers.
//!
//! This module provides the `Transcoder` trait and the ffmpeg-backed
//! implementation that decrypts one chapter's time range and re-encodes it
//! as a standalone audio file.
//!
//! # Example
//!
//! ```ignore
//! use chapterino_core::transcode::{FfmpegTranscoder, OutputProfile, TranscodeJob, Transcoder};
//!
//! let transcoder = FfmpegTranscoder::with_defaults();
//! transcoder.validate().await?;
//!
//! let result = transcoder
//!     .transcode(TranscodeJob {
//!         container: PathBuf::from("book.aax"),
//!         key,
//!         chapter,
//!         output_dir: PathBuf::from("out"),
//!         profile: OutputProfile::default(),
//!     })
//!     .await?;
//! println!("wrote {}", result.output_path.display());
//! ```

mod error;
mod ffmpeg;
mod traits;
mod types;

pub use error::TranscodeError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
pub use types::{AudioFormat, OutputProfile, TranscodeJob, TranscodeResult};
