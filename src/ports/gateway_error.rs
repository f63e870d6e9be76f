//! Errors returned by backend-facing ports.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Failure of a call to the authoritative backend.
///
/// Every variant is recoverable from the caller's point of view: nothing is
/// mutated locally, so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Not authorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Maps a non-success HTTP status to an error.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => GatewayError::Unauthorized,
            404 => GatewayError::NotFound(body),
            409 => GatewayError::Conflict(body),
            _ => GatewayError::UnexpectedStatus { status, body },
        }
    }

    /// Short text for the failure toast.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Unauthorized => "You are not authorized to perform this action.".into(),
            GatewayError::NotFound(_) => "The item could not be found. It may have been removed.".into(),
            GatewayError::Conflict(_) => {
                "The item was changed by someone else. Reload and try again.".into()
            }
            GatewayError::Network(_) | GatewayError::UnexpectedStatus { .. } | GatewayError::Decode(_) => {
                "Something went wrong. Please try again.".into()
            }
        }
    }
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        let code = match &err {
            GatewayError::Unauthorized => ErrorCode::Unauthorized,
            GatewayError::NotFound(_) => ErrorCode::ItemNotFound,
            _ => ErrorCode::BackendError,
        };
        DomainError::new(code, err.to_string())
    }
}
