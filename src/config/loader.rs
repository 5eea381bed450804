//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{BridgeConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the configuration: optional TOML file first, then the process
/// environment on top.
pub fn load(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    load_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load`], with the environment supplied by `lookup`.
pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<BridgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            toml::from_str(&content)?
        }
        None => BridgeConfig::default(),
    };
    let config = apply_env(base, lookup)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so callers (and tests) decide where
/// values come from. Empty values for the upstream fields are kept as-is and
/// reported as missing later; empty numeric values count as unset.
pub fn apply_env<F>(mut config: BridgeConfig, lookup: F) -> Result<BridgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value: port.clone(),
        })?;
    }

    if let Some(url) = lookup("WP_API_URL") {
        config.upstream.url = Some(url);
    }
    if let Some(username) = lookup("WP_API_USERNAME") {
        config.upstream.username = Some(username);
    }
    if let Some(password) = lookup("WP_API_PASSWORD") {
        config.upstream.password = Some(password);
    }
    if let Some(timeout) = lookup("WP_API_TIMEOUT_SECS").filter(|t| !t.trim().is_empty()) {
        config.upstream.timeout_secs =
            Some(timeout.trim().parse().map_err(|_| ConfigError::Env {
                var: "WP_API_TIMEOUT_SECS",
                value: timeout.clone(),
            })?);
    }

    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(format) = lookup("LOG_FORMAT") {
        config.observability.log_format = match format.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" | "text" => LogFormat::Pretty,
            _ => {
                return Err(ConfigError::Env {
                    var: "LOG_FORMAT",
                    value: format,
                })
            }
        };
    }
    if let Some(addr) = lookup("METRICS_ADDRESS").filter(|a| !a.is_empty()) {
        config.observability.metrics_address = Some(addr);
    }

    Ok(config)
}
