//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, timeout, body limit)
//! - Check that a configured origin is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Missing upstream credentials are a runtime condition, not a validation error

use thiserror::Error;

use crate::config::schema::BridgeConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("listener.max_body_bytes must be non-zero")]
    ZeroBodyLimit,

    #[error("upstream.timeout_secs must be non-zero when set")]
    ZeroTimeout,

    #[error("upstream.url '{url}' is not a valid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("upstream.url '{url}' must use http or https, got '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },
}

/// Run every semantic check against `config`.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if let Some(raw) = config.upstream.url.as_deref().filter(|u| !u.is_empty()) {
        match url::Url::parse(raw) {
            Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
                errors.push(ValidationError::UnsupportedScheme {
                    url: raw.to_string(),
                    scheme: parsed.scheme().to_string(),
                });
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&BridgeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = BridgeConfig::default();
        config.listener.port = 0;
        config.upstream.timeout_secs = Some(0);
        config.upstream.url = Some("not a url".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(matches!(errors[2], ValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = BridgeConfig::default();
        config.upstream.url = Some("ftp://wp.test".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("ftp"));
    }

    #[test]
    fn test_missing_credentials_are_valid() {
        let mut config = BridgeConfig::default();
        config.upstream.url = Some("https://wp.test/".into());
        assert!(validate_config(&config).is_ok());
    }
}
