mod config;
mod errors;
mod llm_client;
mod manuscript;
mod routes;
mod state;
mod writing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, ModelTransport};
use crate::manuscript::store::LocalStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quill API v{}", env!("CARGO_PKG_VERSION"));

    // Local store replaces browser local storage; loaded once here
    let store = LocalStore::open(&config.store_path)?;

    // A key saved through the API wins over the environment
    let api_key = store.api_key()?.or_else(|| config.gemini_api_key.clone());
    let llm = GeminiClient::new(
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
        api_key,
    )?;
    info!("LLM client initialized (model: {})", llm.model());
    if !llm.has_api_key().await {
        warn!("No Gemini API key configured; set one via PUT /api/v1/settings/api-key");
    }

    let state = AppState {
        llm: Arc::new(llm),
        store: Arc::new(store),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
