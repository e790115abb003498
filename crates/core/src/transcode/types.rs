//! Types for the transcode module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::key::ActivationBytes;
use crate::probe::Chapter;
use crate::sanitize::sanitize_title;

/// Lossy target codecs with a variable-quality encoding scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// MPEG Audio Layer III
    #[default]
    Mp3,
    /// Ogg Vorbis
    OggVorbis,
}

impl AudioFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg",
        }
    }

    /// Returns the ffmpeg codec name for this format.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Mp3 => "libmp3lame",
            Self::OggVorbis => "libvorbis",
        }
    }
}

/// Target codec and encoder quality for produced chapter files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputProfile {
    /// Target audio format.
    #[serde(default)]
    pub format: AudioFormat,
    /// VBR quality, forwarded verbatim to the encoder (`-q:a`); lower
    /// magnitude means higher fidelity.
    #[serde(default = "default_vbr_quality")]
    pub vbr_quality: String,
}

fn default_vbr_quality() -> String {
    "2".to_string()
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self {
            format: AudioFormat::default(),
            vbr_quality: default_vbr_quality(),
        }
    }
}

/// A single-chapter transcode request.
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    /// Protected container the audio is read from.
    pub container: PathBuf,
    /// Decryption key forwarded to the decoder.
    pub key: ActivationBytes,
    /// The chapter to extract.
    pub chapter: Chapter,
    /// Directory the output file is written into (created if absent).
    pub output_dir: PathBuf,
    /// Target codec and quality.
    pub profile: OutputProfile,
}

impl TranscodeJob {
    /// `NNN_<sanitized title>.<ext>`, zero-padded so lexical order matches
    /// playback order.
    pub fn output_file_name(&self) -> String {
        format!(
            "{:03}_{}.{}",
            self.chapter.index + 1,
            sanitize_title(&self.chapter.title),
            self.profile.format.extension()
        )
    }

    /// Full path of the file this job produces.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }
}

/// Result of a successful chapter transcode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeResult {
    /// Index of the chapter that was extracted.
    pub chapter_index: usize,
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Transcode duration in milliseconds.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(index: usize, title: &str, format: AudioFormat) -> TranscodeJob {
        TranscodeJob {
            container: PathBuf::from("/books/book.aax"),
            key: "1a2b3c4d".parse().unwrap(),
            chapter: Chapter {
                index,
                start_time: 0.0,
                end_time: Some(10.0),
                title: title.to_string(),
            },
            output_dir: PathBuf::from("/out"),
            profile: OutputProfile {
                format,
                vbr_quality: "2".to_string(),
            },
        }
    }

    #[test]
    fn test_audio_format_mappings() {
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
        assert_eq!(AudioFormat::Mp3.ffmpeg_codec(), "libmp3lame");
        assert_eq!(AudioFormat::OggVorbis.extension(), "ogg");
        assert_eq!(AudioFormat::OggVorbis.ffmpeg_codec(), "libvorbis");
    }

    #[test]
    fn test_default_profile_is_mp3_q2() {
        let profile = OutputProfile::default();
        assert_eq!(profile.format, AudioFormat::Mp3);
        assert_eq!(profile.vbr_quality, "2");
    }

    #[test]
    fn test_output_file_name_pads_and_sanitizes() {
        assert_eq!(job(0, "Intro", AudioFormat::Mp3).output_file_name(), "001_Intro.mp3");
        assert_eq!(
            job(1, "Part Two", AudioFormat::Mp3).output_file_name(),
            "002_Part_Two.mp3"
        );
        assert_eq!(
            job(41, "What?!", AudioFormat::OggVorbis).output_file_name(),
            "042_What.ogg"
        );
    }

    #[test]
    fn test_output_file_name_survives_hostile_titles() {
        assert_eq!(job(2, "", AudioFormat::Mp3).output_file_name(), "003_chapter.mp3");
        assert_eq!(
            job(3, "a/b\\c:d", AudioFormat::Mp3).output_file_name(),
            "004_a_b_c_d.mp3"
        );
    }

    #[test]
    fn test_output_path_joins_directory() {
        let path = job(0, "Intro", AudioFormat::Mp3).output_path();
        assert_eq!(path, PathBuf::from("/out/001_Intro.mp3"));
    }
}
