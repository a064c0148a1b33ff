//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use cloutline_core::{GenerationOrchestrator, PersistenceStore};
use std::sync::Arc;
use tokio::sync::Mutex;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<GenerationOrchestrator>,
    pub store: Arc<PersistenceStore>,
    /// Held for the duration of one generate request; a second one is refused.
    pub generation_guard: Mutex<()>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        orchestrator: Arc<GenerationOrchestrator>,
        store: Arc<PersistenceStore>,
    ) -> Self {
        Self {
            config,
            orchestrator,
            store,
            generation_guard: Mutex::new(()),
        }
    }
}
