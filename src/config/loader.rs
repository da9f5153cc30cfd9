//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::VaultConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream base URL.
pub const UPSTREAM_URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the upstream service credential.
pub const SERVICE_KEY_ENV: &str = "SUPABASE_SERVICE_KEY";
/// Environment variable overriding the listener bind address.
pub const BIND_ADDRESS_ENV: &str = "VAULT_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

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

/// Load configuration from an optional TOML file plus the process environment.
pub fn load_config(path: Option<&Path>) -> Result<VaultConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Load configuration using a custom environment lookup.
///
/// Environment values win over file values; empty values are ignored.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<VaultConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => VaultConfig::default(),
    };

    apply_env_overrides(&mut config, env);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut VaultConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = lookup(UPSTREAM_URL_ENV) {
        config.upstream.base_url = url;
    }
    if let Some(key) = lookup(SERVICE_KEY_ENV) {
        config.upstream.service_key = key;
    }
    if let Some(addr) = lookup(BIND_ADDRESS_ENV) {
        config.listener.bind_address = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_only() {
        let config = load_config_with(
            None,
            env_of(&[
                (UPSTREAM_URL_ENV, "https://store.example.com"),
                (SERVICE_KEY_ENV, "key"),
            ]),
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "https://store.example.com");
        assert_eq!(config.upstream.service_key, "key");
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = load_config_with(
            None,
            env_of(&[(UPSTREAM_URL_ENV, "https://store.example.com")]),
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::Missing("upstream.service_key")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nothing_configured_is_fatal() {
        let err = load_config_with(None, env_of(&[])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("upstream.base_url"));
        assert!(message.contains("upstream.service_key"));
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let err = load_config_with(
            None,
            env_of(&[(UPSTREAM_URL_ENV, "https://store.example.com"), (SERVICE_KEY_ENV, "  ")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = std::env::temp_dir().join(format!("vault-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("vault.toml");
        fs::write(
            &path,
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [upstream]
            base_url = "https://file.example.com"
            service_key = "file-key"
            "#,
        )
        .unwrap();

        let config = load_config_with(
            Some(&path),
            env_of(&[(SERVICE_KEY_ENV, "env-key"), (BIND_ADDRESS_ENV, "127.0.0.1:9100")]),
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "https://file.example.com");
        assert_eq!(config.upstream.service_key, "env-key");
        assert_eq!(config.listener.bind_address, "127.0.0.1:9100");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config_with(Some(Path::new("/nonexistent/vault.toml")), env_of(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
