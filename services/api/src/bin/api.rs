//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{GroqHookAdapter, JsonFileStore, MemoryStore},
    config::{Config, StorageBackend},
    error::ApiError,
    web::{rest::ApiDoc, router, state::AppState},
};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use cloutline_core::ports::KeyValueStore;
use cloutline_core::{GenerationOrchestrator, PersistenceStore};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Select the Storage Backend ---
    let kv: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::File => {
            info!("Persisting documents under {}", config.data_dir.display());
            Arc::new(JsonFileStore::new(config.data_dir.clone()))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart.");
            Arc::new(MemoryStore::new())
        }
    };
    let store = Arc::new(PersistenceStore::new(kv));

    // --- 3. Initialize the Remote Generation Adapter ---
    let groq_adapter = Arc::new(GroqHookAdapter::from_config(&config)?);
    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY is not set; remote generation requests will be refused.");
    } else {
        info!("Remote generation enabled with model {}", config.groq_model);
    }
    let orchestrator = Arc::new(GenerationOrchestrator::new(groq_adapter));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), orchestrator, store));

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid CORS_ORIGIN '{}': {}",
            config.cors_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(router(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
