//! API error types with HTTP response mapping.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::BuildError;
use projections::ProjectionError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("Serialization error: {err}"))
    }
}

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The Prometheus recorder could not be installed.
    #[error("Metrics recorder error: {0}")]
    Metrics(#[from] BuildError),

    /// The worker pool configuration was rejected.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// The event feed file could not be read.
    #[error("Failed to read event feed {}: {source}", path.display())]
    EventFeed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error.
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_maps_to_500() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serialization_error_is_internal() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let ApiError::Internal(message) = ApiError::from(err);
        assert!(message.starts_with("Serialization error"));
    }
}
