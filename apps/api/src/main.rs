mod config;
mod errors;
mod keywords;
mod llm_client;
mod models;
mod optimization;
mod presentation;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, HistoryBackendConfig};
use crate::keywords::service::KeywordHistoryService;
use crate::keywords::store::{
    FileBackend, HistoryBackend, HistoryStore, RedisBackend, DEFAULT_REDIS_KEY,
};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Refiner API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize keyword history storage
    let backend = build_history_backend(&config.history_backend)?;
    let history = KeywordHistoryService::new(HistoryStore::new(backend));

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone(), config.llm_timeout)?;
    info!(
        "LLM client initialized (text: {}, images: {})",
        llm_client::TEXT_MODEL,
        llm_client::IMAGE_MODEL
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        history,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser front end is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// File slot by default; a Redis key when `HISTORY_BACKEND=redis`.
fn build_history_backend(config: &HistoryBackendConfig) -> Result<Box<dyn HistoryBackend>> {
    match config {
        HistoryBackendConfig::File { path } => {
            let backend = FileBackend::new(path.clone());
            info!("Keyword history stored in {}", backend.path().display());
            Ok(Box::new(backend))
        }
        HistoryBackendConfig::Redis { url } => {
            let client = redis::Client::open(url.as_str())?;
            info!("Keyword history stored in Redis key {DEFAULT_REDIS_KEY}");
            Ok(Box::new(RedisBackend::new(client, DEFAULT_REDIS_KEY)))
        }
    }
}
