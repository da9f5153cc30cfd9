//! Upstream reply → response envelope.
//!
//! Save accepts 200 and 201, query accepts only 200. Everything else is
//! returned to the caller as an upstream error with the raw body attached.

use reqwest::StatusCode;
use serde_json::Value;

use crate::upstream::UpstreamResponse;
use crate::vault::error::{Operation, VaultError};
use crate::vault::types::{QueryEnvelope, SaveEnvelope};

/// Shape the reply to a row insert.
///
/// The store echoes the created row as a one-element array; a bare object
/// is passed through as-is.
pub fn save_envelope(response: UpstreamResponse) -> Result<SaveEnvelope, VaultError> {
    if !matches!(response.status, StatusCode::OK | StatusCode::CREATED) {
        return Err(upstream_error(Operation::Save, response));
    }

    let value: Value = serde_json::from_str(&response.body)
        .map_err(|e| VaultError::internal(Operation::Save, e))?;

    let data = match value {
        Value::Array(rows) => rows.into_iter().next().ok_or_else(|| {
            VaultError::internal(Operation::Save, "upstream returned an empty representation")
        })?,
        other => other,
    };

    Ok(SaveEnvelope::saved(data))
}

/// Shape the reply to a select. Row order is kept exactly as returned.
pub fn query_envelope(response: UpstreamResponse) -> Result<QueryEnvelope, VaultError> {
    if response.status != StatusCode::OK {
        return Err(upstream_error(Operation::Query, response));
    }

    let rows: Vec<Value> = serde_json::from_str(&response.body)
        .map_err(|e| VaultError::internal(Operation::Query, e))?;

    Ok(QueryEnvelope::found(rows))
}

fn upstream_error(operation: Operation, response: UpstreamResponse) -> VaultError {
    VaultError::Upstream {
        operation,
        status: response.status,
        body: response.body,
    }
}
