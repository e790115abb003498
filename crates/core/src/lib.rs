//! Chapterino core: the chapter extraction and conversion pipeline for
//! DRM-protected audiobook containers.
//!
//! The pipeline probes a container's chapter boundaries, transcodes each
//! chapter into its own audio file (decryption, seeking and encoding are
//! delegated to ffmpeg/ffprobe) and packs the result into a deterministic
//! zip archive. External capabilities are injected through the [`Prober`],
//! [`Transcoder`] and [`Archiver`] traits; [`testing`] carries mock
//! implementations of all three.

pub mod archive;
pub mod config;
pub mod key;
pub mod pipeline;
pub mod probe;
pub mod sanitize;
pub mod testing;
pub mod transcode;

pub use archive::{ArchiveError, ArchiveSummary, Archiver, ZipArchiver};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, AudibleConfig,
    Config, ConfigError, OutputConfig, ServerConfig, ToolsConfig,
};
pub use key::{ActivationBytes, KeyError};
pub use pipeline::{ConversionOutcome, ConversionPipeline, ConversionRequest, PipelineError};
pub use probe::{Chapter, FfprobeProber, ProbeError, Prober};
pub use sanitize::sanitize_title;
pub use transcode::{
    AudioFormat, FfmpegTranscoder, OutputProfile, TranscodeError, TranscodeJob, TranscodeResult,
    Transcoder,
};
