use crate::config::types::{Config, FetchConfig, FilterConfig, GuiConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_filter_config(&config.filter)?;
    validate_gui_config(&config.gui)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.page_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_ms must be >= 1000ms, got {}ms",
            config.page_timeout_ms
        )));
    }

    if config.delay_before_capture_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "delay_before_capture_ms must be <= 60000ms, got {}ms",
            config.delay_before_capture_ms
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if !config.randomize_user_agent && config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty when randomize_user_agent is off".to_string(),
        ));
    }

    if config.spoof_referer {
        Url::parse(&config.referer)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid referer: {}", e)))?;
    }

    if config.accept.trim().is_empty() {
        return Err(ConfigError::Validation("accept cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates filter configuration
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&config.threshold) {
        return Err(ConfigError::Validation(format!(
            "threshold must be between 0.0 and 1.0, got {}",
            config.threshold
        )));
    }

    Ok(())
}

/// Validates GUI configuration
fn validate_gui_config(config: &GuiConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("bind must be a socket address, got '{}': {}", config.bind, e))
    })?;

    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.default_filename.trim().is_empty() {
        return Err(ConfigError::Validation(
            "default_filename cannot be empty".to_string(),
        ));
    }

    Ok(())
}
