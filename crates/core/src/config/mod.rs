//! Adapter-facing configuration.
//!
//! Configuration is loaded by the binaries (TOML file plus `CHAPTERINO_`
//! environment overrides) and handed to the pipeline as explicit values;
//! library code never reads the environment itself.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_env, load_config_from_str};
pub use types::{AudibleConfig, Config, OutputConfig, ServerConfig, ToolsConfig};
pub use validate::validate_config;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
