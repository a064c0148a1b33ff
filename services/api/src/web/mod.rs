pub mod rest;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use rest::*;
use state::AppState;

/// Builds the `/api` router over the shared state. CORS and docs are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/hooks/generate", post(generate_hooks_handler))
        .route("/api/hooks/copy", post(copy_hook_handler))
        .route("/api/hooks/share", post(share_hook_handler))
        .route("/api/favorites", get(list_favorites_handler))
        .route("/api/favorites/toggle", post(toggle_favorite_handler))
        .route("/api/favorites/{id}", delete(remove_favorite_handler))
        .route("/api/stats", get(get_stats_handler))
        .route("/api/history", get(get_history_handler))
        .route(
            "/api/settings",
            get(get_settings_handler).put(put_settings_handler),
        )
        .route("/api/export", post(export_handler))
        .route("/api/hook-of-the-day", get(hook_of_the_day_handler))
        .route("/api/insights", get(insights_handler))
        .route("/api/remote/status", get(remote_status_handler))
        .with_state(app_state)
}
