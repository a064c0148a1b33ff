//! crates/cloutline_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the concrete completion API and storage backend.

use async_trait::async_trait;

use crate::domain::GenerationSettings;
use crate::error::GenerationError;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for storage port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Generates hook texts through a hosted language model.
#[async_trait]
pub trait HookGenerationService: Send + Sync {
    /// Returns exactly five hook texts for the topic.
    async fn generate_hooks(
        &self,
        topic: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<String>, GenerationError>;

    /// Whether a credential is present.
    fn is_configured(&self) -> bool;

    /// Issues a minimal request to check the upstream accepts our credential.
    async fn check_connection(&self) -> bool;
}

/// Durable whole-document key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the document stored under `key`, if any.
    async fn get(&self, key: &str) -> PortResult<Option<String>>;

    /// Replaces the document stored under `key`.
    async fn put(&self, key: &str, value: &str) -> PortResult<()>;
}
