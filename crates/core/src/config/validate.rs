//! Configuration validation.

use super::{types::Config, ConfigError};

/// Validate configuration beyond what serde enforces.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.output.profile.vbr_quality.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.profile.vbr_quality cannot be empty".to_string(),
        ));
    }

    Ok(())
}
