//! Error types for the incident registry.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error type for registry operations.
#[derive(Debug, Error)]
pub enum IncidentError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IncidentError {
    /// The 404 returned for any id that does not name a stored incident.
    pub fn incident_not_found() -> Self {
        IncidentError::NotFound("Incident not found.".to_string())
    }

    /// The 404 returned for paths no route matches.
    pub fn unknown_route() -> Self {
        IncidentError::NotFound(
            "The requested URL was not found on the server.".to_string(),
        )
    }

    /// The 405 returned when a route exists but not for the request method.
    pub fn method_not_allowed() -> Self {
        IncidentError::MethodNotAllowed(
            "The method is not allowed for the requested URL.".to_string(),
        )
    }
}

/// Error response body for API clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for IncidentError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            IncidentError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            IncidentError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            IncidentError::MethodNotAllowed(msg) => {
                (StatusCode::METHOD_NOT_ALLOWED, msg.clone())
            }
            IncidentError::Database(e) => {
                // Log the actual error but don't expose internals
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred.".to_string(),
                )
            }
            IncidentError::Config(msg) => {
                tracing::error!(error = %msg, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error.".to_string(),
                )
            }
            IncidentError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for registry operations.
pub type IncidentResult<T> = Result<T, IncidentError>;
