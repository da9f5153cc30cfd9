//! Context Vault: an HTTP facade over a hosted table store.
//!
//! Accepts context records over JSON, forwards them to the store's REST
//! interface, and relays query results back in a uniform envelope.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;
pub mod vault;

pub use config::VaultConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use vault::{ContextVault, VaultError};
