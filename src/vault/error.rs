//! Error taxonomy for vault operations.

use reqwest::StatusCode;
use thiserror::Error;

/// The operation an error arose from; shapes the caller-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Query,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Save => "save",
            Operation::Query => "retrieve",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Operation::Save => "saving",
            Operation::Query => "retrieving",
        }
    }
}

/// Errors surfaced by the vault to its callers.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Inbound payload or query string failed to parse.
    #[error("{0}")]
    Validation(String),

    /// The store answered with a non-success status.
    #[error("Failed to {} context: {body}", .operation.verb())]
    Upstream {
        operation: Operation,
        status: StatusCode,
        body: String,
    },

    /// The store could not be reached or the reply could not be read.
    #[error("HTTP error occurred: {0}")]
    Transport(#[source] reqwest::Error),

    /// Anything else, e.g. an unparseable success body.
    #[error("Error {} context: {message}", .operation.gerund())]
    Internal {
        operation: Operation,
        message: String,
    },
}

impl VaultError {
    pub fn internal(operation: Operation, message: impl ToString) -> Self {
        VaultError::Internal {
            operation,
            message: message.to_string(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            VaultError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            VaultError::Upstream { status, .. } => *status,
            VaultError::Transport(_) | VaultError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
