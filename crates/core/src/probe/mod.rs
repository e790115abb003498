//! Chapter discovery for protected audiobook containers.
//!
//! This module provides the `Prober` trait and the ffprobe-backed
//! implementation that enumerates chapter boundaries and titles inside a
//! DRM-protected container.
//!
//! # Example
//!
//! ```ignore
//! use chapterino_core::probe::{FfprobeProber, Prober};
//!
//! let prober = FfprobeProber::with_defaults();
//! prober.validate().await?;
//!
//! let chapters = prober.probe_chapters(Path::new("book.aax"), &key).await?;
//! for chapter in &chapters {
//!     println!("{:03} {} ({}s)", chapter.index + 1, chapter.title, chapter.start_time);
//! }
//! ```

mod error;
mod ffprobe;
mod traits;
mod types;

pub use error::ProbeError;
pub use ffprobe::FfprobeProber;
pub use traits::Prober;
pub use types::Chapter;
