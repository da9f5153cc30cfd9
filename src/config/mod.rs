//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (SUPABASE_URL, SUPABASE_SERVICE_KEY, VAULT_BIND_ADDRESS)
//!     → validation.rs (semantic checks)
//!     → VaultConfig (validated, immutable)
//!     → passed by value into startup, cloned into each subsystem
//! ```
//!
//! # Design Decisions
//! - Config is read once at process start and never reloaded
//! - All sections have defaults except the upstream endpoint and credential
//! - A config that fails validation aborts startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{
    CorsConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig, TimeoutConfig,
    UpstreamConfig, VaultConfig,
};
pub use validation::{validate_config, ValidationError};
