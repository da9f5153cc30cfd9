//! Upstream table-store subsystem.
//!
//! # Data Flow
//! ```text
//! vault service
//!     → query.rs (PostgREST filter string, reads only)
//!     → client.rs (credential headers, one HTTP call)
//!     → UpstreamResponse { status, raw body }
//!     → back to the vault translator
//! ```

pub mod client;
pub mod query;

pub use client::{CallKind, ClientInitError, UpstreamClient, UpstreamResponse};
pub use query::SelectQuery;
