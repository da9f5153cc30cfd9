//! Error responses.
//!
//! # Responsibilities
//! - Map vault errors to HTTP status codes
//! - Render every error as `{"detail": "<message>"}`
//!
//! # Design Decisions
//! - Upstream failures keep the store's status code
//! - Transport and internal failures are always 500
//! - Server errors are logged at warn, client errors at debug

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::vault::VaultError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for VaultError {
    fn into_response(self) -> Response {
        // reqwest's StatusCode, converted by value.
        let status = StatusCode::from_u16(self.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Operation;
    use axum::body::to_bytes;

    async fn render(err: VaultError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_upstream_error_response() {
        let (status, body) = render(VaultError::Upstream {
            operation: Operation::Save,
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "down for maintenance".into(),
        })
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.detail, "Failed to save context: down for maintenance");
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let (status, body) = render(VaultError::internal(Operation::Query, "boom")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.detail, "Error retrieving context: boom");
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let (status, body) = render(VaultError::Validation("bad".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.detail, "bad");
    }
}
