//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require the upstream endpoint and credential
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: VaultConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::VaultConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Check a loaded configuration, collecting every violation.
pub fn validate_config(config: &VaultConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let base_url = config.upstream.base_url.trim();
    if base_url.is_empty() {
        errors.push(ValidationError::Missing("upstream.base_url"));
    } else {
        match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::Invalid {
                field: "upstream.base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::Invalid {
                field: "upstream.base_url",
                reason: e.to_string(),
            }),
        }
    }

    if config.upstream.service_key.trim().is_empty() {
        errors.push(ValidationError::Missing("upstream.service_key"));
    }

    if config.upstream.table.trim().is_empty() {
        errors.push(ValidationError::Missing("upstream.table"));
    }

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::Invalid {
            field: "listener.bind_address",
            reason: e.to_string(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Invalid {
            field: "timeouts.request_secs",
            reason: "must be greater than zero".into(),
        });
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::Invalid {
                field: "observability.metrics_address",
                reason: e.to_string(),
            });
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

    fn valid() -> VaultConfig {
        let mut config = VaultConfig::default();
        config.upstream.base_url = "https://store.example.com".into();
        config.upstream.service_key = "service-role-key".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_missing_upstream_reports_both_fields() {
        let errors = validate_config(&VaultConfig::default()).unwrap_err();
        assert!(errors.contains(&ValidationError::Missing("upstream.base_url")));
        assert!(errors.contains(&ValidationError::Missing("upstream.service_key")));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = valid();
        config.upstream.base_url = "ftp://store.example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_rejects_relative_url() {
        let mut config = valid();
        config.upstream.base_url = "store.example.com".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_bind_and_zero_timeout() {
        let mut config = valid();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
