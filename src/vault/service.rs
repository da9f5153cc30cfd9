//! The vault service: save and query context records.

use chrono::Utc;

use crate::upstream::UpstreamClient;
use crate::vault::error::VaultError;
use crate::vault::translate;
use crate::vault::types::{ContextInsert, ContextQuery, ContextRecord, QueryEnvelope, SaveEnvelope};

/// Stateless facade over the upstream table.
#[derive(Debug, Clone)]
pub struct ContextVault {
    upstream: UpstreamClient,
}

impl ContextVault {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    /// Stamp `created_at`, forward the row, and return the stored representation.
    pub async fn save(
        &self,
        record: ContextRecord,
        request_id: Option<&str>,
    ) -> Result<SaveEnvelope, VaultError> {
        let row = ContextInsert::stamp(record, Utc::now());

        let response = self
            .upstream
            .insert(&row, request_id)
            .await
            .map_err(VaultError::Transport)?;

        translate::save_envelope(response)
    }

    /// Fetch rows matching the optional filters, newest first.
    pub async fn query(
        &self,
        query: &ContextQuery,
        request_id: Option<&str>,
    ) -> Result<QueryEnvelope, VaultError> {
        let select = query.to_select();

        let response = self
            .upstream
            .select(&select.to_query_string(), request_id)
            .await
            .map_err(VaultError::Transport)?;

        translate::query_envelope(response)
    }
}
