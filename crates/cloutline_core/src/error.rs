//! crates/cloutline_core/src/error.rs
//!
//! The error taxonomy shared by every generation path.

use std::fmt;

/// Which way an upstream call failed. Derived from the HTTP status where there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    Unauthorized,
    RateLimited,
    BadRequest,
    Timeout,
    Unknown,
}

impl RemoteErrorKind {
    /// Maps an upstream HTTP status code to an error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => RemoteErrorKind::Unauthorized,
            429 => RemoteErrorKind::RateLimited,
            400 => RemoteErrorKind::BadRequest,
            _ => RemoteErrorKind::Unknown,
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteErrorKind::Unauthorized => write!(f, "unauthorized"),
            RemoteErrorKind::RateLimited => write!(f, "rate_limited"),
            RemoteErrorKind::BadRequest => write!(f, "bad_request"),
            RemoteErrorKind::Timeout => write!(f, "timeout"),
            RemoteErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Failures surfaced by hook generation. None of them are retried or masked.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Bad caller input: empty topic, out-of-range settings.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote path was requested but no credential is configured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream call did not succeed.
    #[error("Remote service error ({kind}): {message}")]
    RemoteService {
        kind: RemoteErrorKind,
        message: String,
    },

    /// The upstream call succeeded but produced nothing usable.
    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

impl GenerationError {
    pub fn remote(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        GenerationError::RemoteService {
            kind,
            message: message.into(),
        }
    }

    /// A short machine-readable label, used in API error bodies.
    pub fn kind_label(&self) -> String {
        match self {
            GenerationError::Validation(_) => "validation".to_string(),
            GenerationError::Configuration(_) => "configuration".to_string(),
            GenerationError::RemoteService { kind, .. } => format!("remote_{}", kind),
            GenerationError::EmptyResponse(_) => "empty_response".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_kinds() {
        assert_eq!(RemoteErrorKind::from_status(401), RemoteErrorKind::Unauthorized);
        assert_eq!(RemoteErrorKind::from_status(429), RemoteErrorKind::RateLimited);
        assert_eq!(RemoteErrorKind::from_status(400), RemoteErrorKind::BadRequest);
        assert_eq!(RemoteErrorKind::from_status(503), RemoteErrorKind::Unknown);
    }

    #[test]
    fn labels_are_stable() {
        let err = GenerationError::remote(RemoteErrorKind::RateLimited, "slow down");
        assert_eq!(err.kind_label(), "remote_rate_limited");
        assert_eq!(
            GenerationError::Validation("x".into()).kind_label(),
            "validation"
        );
    }
}
