mod analysis;
mod config;
mod errors;
mod llm_client;
mod quiz;
mod recommend;
mod routes;
mod state;
mod websearch;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::recommend::document::DocumentCache;
use crate::routes::build_router;
use crate::state::AppState;
use crate::websearch::ports::DuckDuckGoSearch;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Guidance API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generation client
    let llm = GeminiClient::new(config.gemini_api_key.clone());
    info!(
        "Generation client initialized (models: {}/{}/{})",
        config.question_model, config.analysis_model, config.career_model
    );

    // Document cache is populated lazily on the first document-grounded call
    let document = Arc::new(DocumentCache::new(config.careers_doc_path.clone()));

    let state = AppState {
        llm: Arc::new(llm),
        search: Arc::new(DuckDuckGoSearch::new()),
        document,
        config: config.clone(),
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
