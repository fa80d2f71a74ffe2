use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Engine base URL is a non-empty http(s) URL
/// - Engine timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Engine validation
    if config.engine.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.base_url cannot be empty".to_string(),
        ));
    }

    if !config.engine.base_url.starts_with("http://")
        && !config.engine.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(format!(
            "engine.base_url must be an http(s) URL, got '{}'",
            config.engine.base_url
        )));
    }

    if config.engine.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "engine.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
