mod assistant;
mod backend_client;
mod config;
mod errors;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::transcript::TranscriptStore;
use crate::backend_client::HttpBackendClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    // Initialize backend client
    let backend = HttpBackendClient::new(
        config.backend_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to build backend HTTP client")?;
    info!(
        "Backend client initialized (url: {}, timeout: {}s)",
        backend.base_url(),
        config.request_timeout_secs
    );

    // Build app state
    let state = AppState {
        backend: Arc::new(backend),
        transcripts: TranscriptStore::new(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
