use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Engine path and profile are not empty
/// - Profile can be used inside a file name
/// - Output extension is a plain alphanumeric suffix
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.engine.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.path cannot be empty".to_string(),
        ));
    }

    let profile = config.engine.profile.trim();
    if profile.is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.profile cannot be empty".to_string(),
        ));
    }
    if profile.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError(format!(
            "engine.profile cannot contain path separators: {:?}",
            config.engine.profile
        )));
    }

    let extension = &config.output.extension;
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::ValidationError(format!(
            "output.extension must be alphanumeric, got {:?}",
            extension
        )));
    }

    Ok(())
}
