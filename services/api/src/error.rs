//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how it is
//! rendered as an HTTP response.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use cloutline_core::export::ExportError;
use cloutline_core::{GenerationError, PortError, RemoteErrorKind};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a failed hook generation.
    #[error("Generation Error: {0}")]
    Generation(#[from] GenerationError),

    /// Represents a failure encoding an export file.
    #[error("Export Error: {0}")]
    Export(#[from] ExportError),

    /// Represents an error building the outbound HTTP client.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body or parameters were unusable.
    #[error("{0}")]
    BadRequest(String),

    /// Another request already holds the resource.
    #[error("{0}")]
    Conflict(String),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Generation(e) => match e {
                GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
                GenerationError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
                GenerationError::RemoteService { kind, .. } => match kind {
                    RemoteErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                    RemoteErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                },
                GenerationError::EmptyResponse(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Port(PortError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A short machine-readable label for the `kind` field.
    pub fn kind(&self) -> String {
        match self {
            ApiError::Generation(e) => e.kind_label(),
            ApiError::Port(PortError::NotFound(_)) => "not_found".to_string(),
            ApiError::Port(_) => "storage".to_string(),
            ApiError::Export(_) => "export".to_string(),
            ApiError::BadRequest(_) => "validation".to_string(),
            ApiError::Conflict(_) => "conflict".to_string(),
            _ => "internal".to_string(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Generation(
                GenerationError::Validation(message)
                | GenerationError::Configuration(message)
                | GenerationError::EmptyResponse(message)
                | GenerationError::RemoteService { message, .. },
            ) => message.clone(),
            ApiError::Port(PortError::NotFound(what)) => format!("{} not found", what),
            ApiError::BadRequest(message) | ApiError::Conflict(message) => message.clone(),
            _ => "An unexpected internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, kind = %self.kind(), "request failed");
        }
        let body = ErrorResponse {
            error: self.public_message(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_errors_map_to_gateway_statuses() {
        let cases = [
            (GenerationError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                GenerationError::Configuration("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                GenerationError::remote(RemoteErrorKind::RateLimited, "x"),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                GenerationError::remote(RemoteErrorKind::Timeout, "x"),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                GenerationError::remote(RemoteErrorKind::Unauthorized, "x"),
                StatusCode::BAD_GATEWAY,
            ),
            (GenerationError::EmptyResponse("x".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn storage_errors_are_not_found_or_internal() {
        let missing = ApiError::Port(PortError::NotFound("Favorite hook-1".into()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.kind(), "not_found");

        let broken = ApiError::Port(PortError::Unexpected("x".into()));
        assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = ApiError::Port(PortError::Unexpected("disk path /secret".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "storage");
        assert!(!err.public_message().contains("/secret"));
    }

    #[test]
    fn remote_messages_are_passed_through() {
        let err = ApiError::from(GenerationError::remote(
            RemoteErrorKind::RateLimited,
            "Rate limit exceeded. Please try again in a moment.",
        ));
        assert_eq!(err.kind(), "remote_rate_limited");
        assert_eq!(
            err.public_message(),
            "Rate limit exceeded. Please try again in a moment."
        );
    }
}
