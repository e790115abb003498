//! Types for the probe module.

use serde::{Deserialize, Serialize};

/// A contiguous time range within the container's audio stream.
///
/// Chapters are immutable once probed: `index` matches playback order and is
/// never reassigned, and `end_time == None` means "to end of stream".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Zero-based ordinal position within the container.
    pub index: usize,
    /// Seconds offset into the source audio stream.
    pub start_time: f64,
    /// Seconds offset where the chapter ends; `None` runs to end of stream.
    pub end_time: Option<f64>,
    /// Human-readable label from container metadata.
    pub title: String,
}

impl Chapter {
    /// Synthesized label used when container metadata carries no title.
    pub fn fallback_title(index: usize) -> String {
        format!("Chapter_{:03}", index + 1)
    }

    /// Full-length stand-in for containers that expose no chapter metadata.
    pub fn whole_stream() -> Self {
        Self {
            index: 0,
            start_time: 0.0,
            end_time: None,
            title: Self::fallback_title(0),
        }
    }
}
