//! Route handlers.
//!
//! `/` and `/health` never touch the store. `/vault/save` and
//! `/vault/context` parse their input, then make exactly one upstream call.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::vault::types::timestamp;
use crate::vault::{ContextQuery, ContextRecord, QueryEnvelope, SaveEnvelope, VaultError};

/// Paths advertised by the root endpoint.
pub const ENDPOINTS: [&str; 2] = ["/vault/save", "/vault/context"];

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Context Vault API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// Shallow liveness only; the store is not probed.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: timestamp(Utc::now()),
    })
}

/// Unparseable payloads become validation errors. Body-level failures such as
/// an over-limit stream keep their own status.
fn reject_payload(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => {
            VaultError::Validation(rejection.body_text()).into_response()
        }
        other => {
            tracing::debug!(status = other.status().as_u16(), error = %other, "Body rejected");
            other.into_response()
        }
    }
}

pub async fn save(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ContextRecord>, JsonRejection>,
) -> Result<Json<SaveEnvelope>, Response> {
    let Json(record) = payload.map_err(reject_payload)?;
    let request_id = request_id(&headers);

    tracing::debug!(
        user_id = %record.user_id,
        context_type = %record.context_type,
        "Saving context"
    );

    let envelope = state
        .vault
        .save(record, request_id)
        .await
        .map_err(IntoResponse::into_response)?;

    tracing::info!(id = ?envelope.data.get("id"), "Context saved");
    Ok(Json(envelope))
}

pub async fn query(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ContextQuery>, QueryRejection>,
) -> Result<Json<QueryEnvelope>, VaultError> {
    let Query(params) = params.map_err(|e| VaultError::Validation(e.body_text()))?;
    let request_id = request_id(&headers);

    let envelope = state.vault.query(&params, request_id).await?;

    tracing::info!(
        user_id = ?params.user_id,
        context_type = ?params.context_type,
        limit = params.limit,
        count = envelope.count,
        "Context retrieved"
    );
    Ok(Json(envelope))
}
