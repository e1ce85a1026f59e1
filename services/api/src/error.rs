//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its mapping
//! to HTTP responses. Internal detail is logged server-side; clients only
//! ever see a stable, generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::config::ConfigError;
use clinic_core::ports::PortError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The structured failure body every error response carries.
#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    /// The HTTP status and client-facing message for this error.
    ///
    /// Validation and not-found failures pass their message through; anything
    /// touching storage or internals collapses to a generic message so raw
    /// error text never leaks to the client.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Port(PortError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Port(PortError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Port(PortError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {:?}", self);
        }
        let body = ErrorBody {
            success: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request_with_its_message() {
        let err = ApiError::Port(PortError::Validation("full_name is required".to_string()));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "full_name is required");
    }

    #[test]
    fn storage_detail_never_reaches_the_client() {
        let err = ApiError::Port(PortError::Unexpected(
            "UNIQUE constraint failed: admin_users.username".to_string(),
        ));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "An internal error occurred");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::Port(PortError::NotFound("Appointment 99 not found".to_string()));
        let (status, _) = err.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
