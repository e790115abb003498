//! FFprobe-based prober implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::config::ToolsConfig;
use crate::key::ActivationBytes;

use super::error::ProbeError;
use super::traits::Prober;
use super::types::Chapter;

/// Reads chapter metadata with `ffprobe -show_chapters`.
pub struct FfprobeProber {
    config: ToolsConfig,
}

impl FfprobeProber {
    /// Creates a new prober with the given tool configuration.
    pub fn new(config: ToolsConfig) -> Self {
        Self { config }
    }

    /// Creates a prober with default tool paths.
    pub fn with_defaults() -> Self {
        Self::new(ToolsConfig::default())
    }

    /// Parses `-print_format json -show_chapters` output into chapters.
    fn parse_chapters(output: &str) -> Result<Vec<Chapter>, ProbeError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            #[serde(default)]
            chapters: Vec<ProbeChapter>,
        }

        #[derive(Deserialize)]
        struct ProbeChapter {
            start_time: Option<String>,
            end_time: Option<String>,
            #[serde(default)]
            tags: ProbeTags,
        }

        #[derive(Deserialize, Default)]
        struct ProbeTags {
            title: Option<String>,
        }

        let probe: ProbeOutput =
            serde_json::from_str(output).map_err(|e| ProbeError::InvalidOutput {
                reason: format!("not valid ffprobe JSON: {}", e),
            })?;

        let mut chapters = Vec::with_capacity(probe.chapters.len());
        for (index, raw) in probe.chapters.into_iter().enumerate() {
            let start_time = match raw.start_time {
                Some(s) => parse_seconds(&s, index, "start_time")?,
                None => 0.0,
            };
            let end_time = match raw.end_time {
                Some(s) => Some(parse_seconds(&s, index, "end_time")?),
                None => None,
            };
            let title = raw
                .tags
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| Chapter::fallback_title(index));

            chapters.push(Chapter {
                index,
                start_time,
                end_time,
                title,
            });
        }

        Self::normalize(chapters)
    }

    /// Enforces ordering and fills the gaps the raw metadata leaves open.
    fn normalize(mut chapters: Vec<Chapter>) -> Result<Vec<Chapter>, ProbeError> {
        if chapters.is_empty() {
            return Ok(vec![Chapter::whole_stream()]);
        }

        for pair in chapters.windows(2) {
            if pair[1].start_time < pair[0].start_time {
                return Err(ProbeError::InvalidOutput {
                    reason: format!(
                        "chapter {} starts before chapter {}",
                        pair[1].index, pair[0].index
                    ),
                });
            }
        }

        // An open end on a non-last chapter would re-read every later
        // chapter's audio; clamp it to the next chapter's start.
        let next_starts: Vec<f64> = chapters.iter().skip(1).map(|c| c.start_time).collect();
        for (chapter, next_start) in chapters.iter_mut().zip(next_starts) {
            if chapter.end_time.is_none() {
                chapter.end_time = Some(next_start);
            }
        }

        Ok(chapters)
    }
}

fn parse_seconds(value: &str, index: usize, field: &str) -> Result<f64, ProbeError> {
    value.parse::<f64>().map_err(|_| ProbeError::InvalidOutput {
        reason: format!("chapter {} has a non-numeric {}: {:?}", index, field, value),
    })
}

#[async_trait]
impl Prober for FfprobeProber {
    fn name(&self) -> &str {
        "ffprobe"
    }

    async fn probe_chapters(
        &self,
        container: &Path,
        key: &ActivationBytes,
    ) -> Result<Vec<Chapter>, ProbeError> {
        if !container.exists() {
            return Err(ProbeError::InputNotFound {
                path: container.to_path_buf(),
            });
        }

        debug!(container = %container.display(), "probing chapters");

        let output = Command::new(&self.config.ffprobe_path)
            .args(["-v", "error", "-activation_bytes"])
            .arg(key.as_str())
            .args(["-print_format", "json", "-show_chapters", "-i"])
            .arg(container)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::ToolMissing {
                        tool: self.config.ffprobe_path.clone(),
                    }
                } else {
                    ProbeError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_chapters(&stdout)
    }

    async fn validate(&self) -> Result<(), ProbeError> {
        let result = Command::new(&self.config.ffprobe_path)
            .arg("-version")
            .output()
            .await;

        if let Err(e) = result {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Err(ProbeError::ToolMissing {
                    tool: self.config.ffprobe_path.clone(),
                });
            }
            return Err(ProbeError::Io(e));
        }

        Ok(())
    }
}
