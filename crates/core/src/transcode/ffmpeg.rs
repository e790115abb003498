//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use crate::config::ToolsConfig;

use super::error::TranscodeError;
use super::traits::Transcoder;
use super::types::{TranscodeJob, TranscodeResult};

/// Decrypts and re-encodes single chapters with ffmpeg.
pub struct FfmpegTranscoder {
    config: ToolsConfig,
}

impl FfmpegTranscoder {
    /// Creates a new transcoder with the given tool configuration.
    pub fn new(config: ToolsConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default tool paths.
    pub fn with_defaults() -> Self {
        Self::new(ToolsConfig::default())
    }

    /// Builds the ffmpeg argument list for one chapter extraction.
    fn build_args(&self, job: &TranscodeJob, output_path: &Path) -> Vec<String> {
        let chapter = &job.chapter;
        let mut args = vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            "-activation_bytes".to_string(),
            job.key.as_str().to_string(),
            "-i".to_string(),
            job.container.to_string_lossy().to_string(),
            // The container is a talking book; keep the primary audio
            // stream and drop everything else.
            "-vn".to_string(),
            "-sn".to_string(),
            "-dn".to_string(),
            "-map".to_string(),
            "0:a:0".to_string(),
            // Output-side seek: slower than an input seek but sample
            // accurate at chapter boundaries.
            "-ss".to_string(),
            chapter.start_time.to_string(),
        ];

        if let Some(end) = chapter.end_time {
            args.extend(["-to".to_string(), end.to_string()]);
        }

        args.extend([
            // Container metadata belongs to the whole book; the chapter
            // file carries its own title and nothing else.
            "-map_metadata".to_string(),
            "-1".to_string(),
            "-metadata".to_string(),
            format!("title={}", chapter.title),
            "-c:a".to_string(),
            job.profile.format.ffmpeg_codec().to_string(),
            "-q:a".to_string(),
            job.profile.vbr_quality.clone(),
            output_path.to_string_lossy().to_string(),
        ]);

        args
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscodeError> {
        let start = Instant::now();

        tokio::fs::create_dir_all(&job.output_dir)
            .await
            .map_err(|e| TranscodeError::OutputDirFailed {
                path: job.output_dir.clone(),
                source: e,
            })?;

        let output_path = job.output_path();
        let args = self.build_args(&job, &output_path);

        debug!(
            chapter = job.chapter.index,
            output = %output_path.display(),
            "transcoding chapter"
        );

        let output = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::ToolMissing {
                        tool: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    TranscodeError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(TranscodeError::ChapterFailed {
                chapter_index: job.chapter.index,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let meta = tokio::fs::metadata(&output_path).await?;

        Ok(TranscodeResult {
            chapter_index: job.chapter.index,
            output_path,
            output_size_bytes: meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), TranscodeError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .await;

        if let Err(e) = result {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Err(TranscodeError::ToolMissing {
                    tool: self.config.ffmpeg_path.clone(),
                });
            }
            return Err(TranscodeError::Io(e));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Chapter;
    use crate::transcode::{AudioFormat, OutputProfile};
    use std::path::PathBuf;

    fn test_job(end_time: Option<f64>) -> TranscodeJob {
        TranscodeJob {
            container: PathBuf::from("/books/book.aax"),
            key: "1A2B3C4D".parse().unwrap(),
            chapter: Chapter {
                index: 4,
                start_time: 120.5,
                end_time,
                title: "Part Two".to_string(),
            },
            output_dir: PathBuf::from("/out"),
            profile: OutputProfile {
                format: AudioFormat::Mp3,
                vbr_quality: "4".to_string(),
            },
        }
    }

    fn args_for(job: &TranscodeJob) -> Vec<String> {
        let transcoder = FfmpegTranscoder::with_defaults();
        transcoder.build_args(job, &job.output_path())
    }

    fn arg_pair(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    }

    #[test]
    fn test_build_args_applies_key_before_input() {
        let job = test_job(Some(300.0));
        let args = args_for(&job);

        let key_pos = args.iter().position(|a| a == "-activation_bytes").unwrap();
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[key_pos + 1], "1A2B3C4D");
        assert!(key_pos < input_pos);
    }

    #[test]
    fn test_build_args_selects_primary_audio_only() {
        let args = args_for(&test_job(Some(300.0)));
        for flag in ["-vn", "-sn", "-dn"] {
            assert!(args.contains(&flag.to_string()));
        }
        assert_eq!(arg_pair(&args, "-map").unwrap(), "0:a:0");
    }

    #[test]
    fn test_build_args_bounded_chapter() {
        let args = args_for(&test_job(Some(300.0)));
        assert_eq!(arg_pair(&args, "-ss").unwrap(), "120.5");
        assert_eq!(arg_pair(&args, "-to").unwrap(), "300");
    }

    #[test]
    fn test_build_args_open_ended_chapter_has_no_bound() {
        let args = args_for(&test_job(None));
        assert_eq!(arg_pair(&args, "-ss").unwrap(), "120.5");
        assert!(!args.contains(&"-to".to_string()));
    }

    #[test]
    fn test_build_args_replaces_metadata_with_chapter_title() {
        let args = args_for(&test_job(Some(300.0)));
        assert_eq!(arg_pair(&args, "-map_metadata").unwrap(), "-1");
        // The embedded title keeps the original text; only file names are
        // sanitized.
        assert_eq!(arg_pair(&args, "-metadata").unwrap(), "title=Part Two");
    }

    #[test]
    fn test_build_args_codec_quality_and_destination() {
        let job = test_job(Some(300.0));
        let args = args_for(&job);

        assert_eq!(arg_pair(&args, "-c:a").unwrap(), "libmp3lame");
        assert_eq!(arg_pair(&args, "-q:a").unwrap(), "4");
        assert_eq!(args.last().unwrap(), "/out/005_Part_Two.mp3");
    }
}
