//! Configuration types.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::key::ActivationBytes;
use crate::transcode::OutputProfile;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub audible: AudibleConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// External binary locations and verbosity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Path to the ffprobe binary.
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: PathBuf,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, ...).
    #[serde(default = "default_ffmpeg_log_level")]
    pub ffmpeg_log_level: String,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ffprobe_path() -> PathBuf {
    PathBuf::from("ffprobe")
}

fn default_ffmpeg_log_level() -> String {
    "error".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            ffmpeg_log_level: default_ffmpeg_log_level(),
        }
    }
}

impl ToolsConfig {
    /// Creates a config with custom ffmpeg/ffprobe paths.
    pub fn with_paths(ffmpeg_path: PathBuf, ffprobe_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
            ..Default::default()
        }
    }
}

/// Where converted books land and how they are encoded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Base directory for per-book output directories and archives.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Encoder profile applied to every chapter.
    #[serde(default)]
    pub profile: OutputProfile,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            profile: OutputProfile::default(),
        }
    }
}

/// Account-level defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AudibleConfig {
    /// Activation bytes used when the caller does not supply any.
    #[serde(default)]
    pub activation_bytes: Option<ActivationBytes>,
}

/// HTTP adapter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upload size cap for the multipart convert endpoint.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    4 * 1024 * 1024 * 1024 // 4 GiB, a full-length audiobook fits comfortably
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::AudioFormat;

    #[test]
    fn test_default_tools_config() {
        let tools = ToolsConfig::default();
        assert_eq!(tools.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(tools.ffprobe_path, PathBuf::from("ffprobe"));
        assert_eq!(tools.ffmpeg_log_level, "error");
    }

    #[test]
    fn test_tools_config_with_paths() {
        let tools = ToolsConfig::with_paths(
            PathBuf::from("/usr/local/bin/ffmpeg"),
            PathBuf::from("/usr/local/bin/ffprobe"),
        );
        assert_eq!(tools.ffmpeg_path, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(tools.ffmpeg_log_level, "error");
    }

    #[test]
    fn test_default_output_config() {
        let output = OutputConfig::default();
        assert_eq!(output.dir, PathBuf::from("output"));
        assert_eq!(output.profile.format, AudioFormat::Mp3);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.tools.ffmpeg_path, config.tools.ffmpeg_path);
    }
}
