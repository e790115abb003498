//! Testing utilities and mock implementations.
//!
//! This module provides controllable mock implementations of the pipeline's
//! three capabilities, so orchestration behavior can be tested without
//! ffmpeg, ffprobe or an actual protected container.
//!
//! # Example
//!
//! ```rust,ignore
//! use chapterino_core::testing::{fixtures, MockArchiver, MockProber, MockTranscoder};
//!
//! let prober = MockProber::new();
//! prober.set_chapters(fixtures::chapters(5)).await;
//!
//! let transcoder = MockTranscoder::new();
//! transcoder.set_fail_at_index(2).await;
//!
//! // Wire into a ConversionPipeline and assert on recorded jobs...
//! ```

mod mock_archiver;
mod mock_prober;
mod mock_transcoder;

pub use mock_archiver::MockArchiver;
pub use mock_prober::MockProber;
pub use mock_transcoder::{MockTranscoder, RecordedTranscode};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::probe::Chapter;

    /// Create a chapter with explicit bounds.
    pub fn chapter(index: usize, start: f64, end: Option<f64>, title: &str) -> Chapter {
        Chapter {
            index,
            start_time: start,
            end_time: end,
            title: title.to_string(),
        }
    }

    /// Create `count` back-to-back two-minute chapters; the last one runs
    /// to end of stream.
    pub fn chapters(count: usize) -> Vec<Chapter> {
        (0..count)
            .map(|i| {
                let start = i as f64 * 120.0;
                let end = if i + 1 == count {
                    None
                } else {
                    Some(start + 120.0)
                };
                chapter(i, start, end, &format!("Chapter {}", i + 1))
            })
            .collect()
    }
}
