//! Context record shapes and response envelopes.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::upstream::SelectQuery;

/// Arbitrary JSON object carried through unchanged.
pub type JsonObject = Map<String, Value>;

/// Default number of rows returned by a query.
pub const DEFAULT_LIMIT: i64 = 10;

/// A context record as submitted by a caller.
///
/// Unknown fields (including any caller-supplied `id` or `created_at`) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContextRecord {
    pub user_id: String,
    pub context_type: String,
    pub context_data: JsonObject,
    #[serde(default)]
    pub metadata: Option<JsonObject>,
}

/// The row forwarded to the store on save.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextInsert {
    pub user_id: String,
    pub context_type: String,
    pub context_data: JsonObject,
    pub metadata: JsonObject,
    pub created_at: String,
}

impl ContextInsert {
    /// Stamp a submitted record with `now` and fill in absent metadata.
    pub fn stamp(record: ContextRecord, now: DateTime<Utc>) -> Self {
        Self {
            user_id: record.user_id,
            context_type: record.context_type,
            context_data: record.context_data,
            metadata: record.metadata.unwrap_or_default(),
            created_at: timestamp(now),
        }
    }
}

/// ISO-8601 UTC with microsecond precision and a `Z` suffix.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Query parameters accepted by the context listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContextQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub context_type: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for ContextQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            context_type: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ContextQuery {
    /// Translate into a store query, newest first. Empty filters are skipped.
    pub fn to_select(&self) -> SelectQuery {
        let mut select = SelectQuery::new();
        if let Some(user_id) = non_empty(&self.user_id) {
            select = select.eq("user_id", user_id);
        }
        if let Some(context_type) = non_empty(&self.context_type) {
            select = select.eq("context_type", context_type);
        }
        select.limit(self.limit).order_desc("created_at")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Envelope returned by a successful save.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveEnvelope {
    pub success: bool,
    pub message: &'static str,
    pub data: Value,
}

impl SaveEnvelope {
    pub fn saved(data: Value) -> Self {
        Self {
            success: true,
            message: "Context saved successfully",
            data,
        }
    }
}

/// Envelope returned by a successful query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryEnvelope {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Value>,
}

impl QueryEnvelope {
    pub fn found(data: Vec<Value>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}
