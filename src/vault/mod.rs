//! Context vault domain.
//!
//! # Data Flow
//! ```text
//! save:  ContextRecord → stamp created_at, default metadata → upstream insert
//!        → translate.rs (200/201 → first row) → SaveEnvelope
//! query: ContextQuery → SelectQuery (eq filters, limit, order) → upstream select
//!        → translate.rs (200 → rows as returned) → QueryEnvelope
//! ```
//!
//! # Design Decisions
//! - No local state; the store owns identity, persistence and ordering
//! - Record payloads are opaque JSON objects, key order preserved
//! - Every failure is surfaced on the same request, never retried

pub mod error;
pub mod service;
pub mod translate;
pub mod types;

pub use error::{Operation, VaultError};
pub use service::ContextVault;
pub use types::{
    ContextInsert, ContextQuery, ContextRecord, JsonObject, QueryEnvelope, SaveEnvelope,
    DEFAULT_LIMIT,
};
