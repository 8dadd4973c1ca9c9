use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;

use api::{AppConfig, AppState, logging, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    logging::init(config.log_format);

    let state = Arc::new(AppState::from_config(&config));

    if !state.summarizer.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set; /api/summarize will fail");
    }
    if !state.dispatcher.is_configured() {
        tracing::warn!("Gmail credentials are missing or invalid; /api/email will fail");
    }

    let app = router(state, config.max_upload_bytes)
        .layer(config.cors_layer()?)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
