//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI document.

use crate::error::{ApiError, ErrorResponse};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use cloutline_core::daily::hook_of_the_day;
use cloutline_core::export::{export_hooks, select_hooks, ExportOptions, ExportSource};
use cloutline_core::insights::{insights, Insight};
use cloutline_core::share::{share_url, SharePlatform};
use cloutline_core::{
    ActionKind, GenerationHistory, GenerationSettings, Hook, UserStats,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_hooks_handler,
        copy_hook_handler,
        share_hook_handler,
        list_favorites_handler,
        toggle_favorite_handler,
        remove_favorite_handler,
        get_stats_handler,
        get_history_handler,
        get_settings_handler,
        put_settings_handler,
        export_handler,
        hook_of_the_day_handler,
        insights_handler,
        remote_status_handler,
    ),
    components(
        schemas(
            GenerateRequest,
            GenerateResponse,
            CopyRequest,
            ShareRequest,
            ShareResponse,
            ToggleFavoriteResponse,
            RemoteStatusResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Cloutline API", description = "Hook generation, favorites, stats and export.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The request payload for a generation.
#[derive(Deserialize, ToSchema)]
pub struct GenerateRequest {
    topic: String,
    /// Falls back to the stored settings when absent.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    settings: Option<GenerationSettings>,
}

#[derive(Serialize, ToSchema)]
pub struct GenerateResponse {
    #[schema(value_type = Vec<Object>)]
    hooks: Vec<Hook>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyRequest {
    hook_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ShareRequest {
    text: String,
    #[schema(value_type = String, example = "twitter")]
    platform: SharePlatform,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    url: String,
    /// Post length the platform enforces, if it enforces one.
    #[serde(skip_serializing_if = "Option::is_none")]
    character_limit: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct ToggleFavoriteResponse {
    favorited: bool,
    #[schema(value_type = Vec<Object>)]
    favorites: Vec<Hook>,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    source: ExportSource,
    #[serde(flatten)]
    options: ExportOptions,
}

#[derive(Serialize, ToSchema)]
pub struct RemoteStatusResponse {
    configured: bool,
    reachable: bool,
    model: String,
}

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

//=========================================================================================
// Generation Handlers
//=========================================================================================

/// Generate a batch of five hooks for a topic.
///
/// Only one generation runs at a time; a concurrent request is refused with 409.
#[utoipa::path(
    post,
    path = "/api/hooks/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Five hooks generated", body = GenerateResponse),
        (status = 400, description = "Invalid topic or settings", body = ErrorResponse),
        (status = 409, description = "A generation is already in progress", body = ErrorResponse),
        (status = 429, description = "Upstream rate limit", body = ErrorResponse),
        (status = 502, description = "Upstream failure or unusable answer", body = ErrorResponse),
        (status = 503, description = "Remote generation is not configured", body = ErrorResponse),
        (status = 504, description = "Upstream timed out", body = ErrorResponse)
    )
)]
pub async fn generate_hooks_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = payload(body)?;

    let Ok(_guard) = app_state.generation_guard.try_lock() else {
        return Err(ApiError::Conflict(
            "A generation is already in progress".to_string(),
        ));
    };

    let settings = match request.settings {
        Some(settings) => settings,
        None => app_state.store.get_settings().await,
    };

    let hooks = app_state
        .orchestrator
        .run(&request.topic, &settings)
        .await
        .map_err(|e| {
            warn!(error = %e, topic = %request.topic, "generation failed");
            e
        })?;

    if let Err(e) = app_state.store.record_action(ActionKind::Generate).await {
        error!("Failed to record generate action: {:?}", e);
    }
    let entry = GenerationHistory {
        id: Uuid::new_v4().to_string(),
        topic: request.topic.trim().to_string(),
        hooks: hooks.clone(),
        timestamp: Utc::now(),
        settings: Some(settings),
    };
    if let Err(e) = app_state.store.add_to_history(entry).await {
        error!("Failed to append generation history: {:?}", e);
    }

    Ok(Json(GenerateResponse { hooks }))
}

/// Record that a hook was copied to the clipboard.
#[utoipa::path(
    post,
    path = "/api/hooks/copy",
    request_body = CopyRequest,
    responses(
        (status = 200, description = "Updated usage stats"),
        (status = 400, description = "Missing hook id", body = ErrorResponse)
    )
)]
pub async fn copy_hook_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<CopyRequest>, JsonRejection>,
) -> Result<Json<UserStats>, ApiError> {
    let request = payload(body)?;
    if request.hook_id.trim().is_empty() {
        return Err(ApiError::BadRequest("hookId is required".to_string()));
    }

    let stats = match app_state.store.record_action(ActionKind::Copy).await {
        Ok(stats) => stats,
        Err(e) => {
            error!("Failed to record copy of {}: {:?}", request.hook_id, e);
            app_state.store.get_stats().await
        }
    };
    Ok(Json(stats))
}

/// Build a share link for a hook and record the share.
#[utoipa::path(
    post,
    path = "/api/hooks/share",
    request_body = ShareRequest,
    responses(
        (status = 200, description = "Share intent URL", body = ShareResponse),
        (status = 400, description = "Empty text or unknown platform", body = ErrorResponse)
    )
)]
pub async fn share_hook_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<ShareRequest>, JsonRejection>,
) -> Result<Json<ShareResponse>, ApiError> {
    let request = payload(body)?;
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("text is required".to_string()));
    }

    let url = share_url(request.platform, text)
        .map_err(|e| ApiError::Internal(format!("failed to build share URL: {}", e)))?;

    if let Err(e) = app_state.store.record_action(ActionKind::Share).await {
        error!("Failed to record share action: {:?}", e);
    }

    Ok(Json(ShareResponse {
        url: url.to_string(),
        character_limit: request.platform.character_limit(),
    }))
}

//=========================================================================================
// Favorites Handlers
//=========================================================================================

/// List saved hooks in the order they were saved.
#[utoipa::path(
    get,
    path = "/api/favorites",
    responses((status = 200, description = "Saved hooks"))
)]
pub async fn list_favorites_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<Hook>> {
    Json(app_state.store.get_favorites().await)
}

/// Save the hook, or un-save it when it is already a favorite.
#[utoipa::path(
    post,
    path = "/api/favorites/toggle",
    request_body(content_type = "application/json", description = "The hook to toggle."),
    responses(
        (status = 200, description = "New favorite state", body = ToggleFavoriteResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn toggle_favorite_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<Hook>, JsonRejection>,
) -> Result<Json<ToggleFavoriteResponse>, ApiError> {
    let hook = payload(body)?;
    let favorited = app_state.store.toggle_favorite(hook).await?;
    let favorites = app_state.store.get_favorites().await;
    Ok(Json(ToggleFavoriteResponse {
        favorited,
        favorites,
    }))
}

/// Remove a saved hook by id.
#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    responses(
        (status = 200, description = "Remaining saved hooks"),
        (status = 404, description = "No favorite with that id", body = ErrorResponse)
    ),
    params(
        ("id" = String, Path, description = "The hook id.")
    )
)]
pub async fn remove_favorite_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Hook>>, ApiError> {
    Ok(Json(app_state.store.remove_favorite(&id).await?))
}

//=========================================================================================
// Stats, History & Settings Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/api/stats",
    responses((status = 200, description = "Usage counters and streak"))
)]
pub async fn get_stats_handler(State(app_state): State<Arc<AppState>>) -> Json<UserStats> {
    Json(app_state.store.get_stats().await)
}

#[utoipa::path(
    get,
    path = "/api/history",
    responses((status = 200, description = "Recent generation batches, oldest first"))
)]
pub async fn get_history_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<GenerationHistory>> {
    Json(app_state.store.get_history().await)
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, description = "Stored generation settings"))
)]
pub async fn get_settings_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<GenerationSettings> {
    Json(app_state.store.get_settings().await)
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body(content_type = "application/json", description = "The settings to store."),
    responses(
        (status = 200, description = "Stored settings"),
        (status = 400, description = "Invalid settings", body = ErrorResponse)
    )
)]
pub async fn put_settings_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<GenerationSettings>, JsonRejection>,
) -> Result<Json<GenerationSettings>, ApiError> {
    let settings = payload(body)?;
    settings.validate()?;
    app_state.store.save_settings(&settings).await?;
    info!(style = settings.style.as_str(), "settings saved");
    Ok(Json(settings))
}

//=========================================================================================
// Export & Featured Handlers
//=========================================================================================

/// Download hooks as json, csv, txt, pdf or docx.
#[utoipa::path(
    post,
    path = "/api/export",
    request_body(
        content_type = "application/json",
        description = "`{source, format, includeMetadata, categories?, start?, end?}`"
    ),
    responses(
        (status = 200, description = "The exported file as an attachment"),
        (status = 400, description = "Unknown format or source", body = ErrorResponse)
    )
)]
pub async fn export_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = payload(body)?;
    let now = Utc::now();

    let generated: Vec<Hook> = app_state
        .store
        .get_history()
        .await
        .into_iter()
        .flat_map(|entry| entry.hooks)
        .collect();
    let favorites = match request.source {
        ExportSource::Favorites => app_state.store.get_favorites().await,
        _ => Vec::new(),
    };

    let hooks = select_hooks(request.source, generated, favorites, now);
    let file = export_hooks(&hooks, &request.options, now)?;
    info!(
        file = %file.file_name,
        bytes = file.body.len(),
        "export prepared"
    );

    Ok((
        [
            (header::CONTENT_TYPE, file.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.body,
    ))
}

#[utoipa::path(
    get,
    path = "/api/hook-of-the-day",
    responses((status = 200, description = "Today's featured hook"))
)]
pub async fn hook_of_the_day_handler() -> Json<Hook> {
    Json(hook_of_the_day(Utc::now().date_naive()))
}

/// Usage insights over the stored stats and the most recent batch.
#[utoipa::path(
    get,
    path = "/api/insights",
    responses((status = 200, description = "Insights, most relevant rules first"))
)]
pub async fn insights_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<Insight>> {
    let stats = app_state.store.get_stats().await;
    let latest = app_state
        .store
        .get_history()
        .await
        .pop()
        .map(|entry| entry.hooks)
        .unwrap_or_default();
    Json(insights(&stats, &latest, Utc::now()))
}

/// Whether a remote credential is set and the upstream accepts it.
#[utoipa::path(
    get,
    path = "/api/remote/status",
    responses((status = 200, description = "Remote generation availability", body = RemoteStatusResponse))
)]
pub async fn remote_status_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<RemoteStatusResponse> {
    let remote = app_state.orchestrator.remote();
    let configured = remote.is_configured();
    let reachable = configured && remote.check_connection().await;
    Json(RemoteStatusResponse {
        configured,
        reachable,
        model: app_state.config.groq_model.clone(),
    })
}
