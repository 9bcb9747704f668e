//! AI Safety Incident Registry
//!
//! A small HTTP service that records, lists and retires reports of AI
//! systems misbehaving, backed by SQLite.

use tokio::net::TcpListener;

mod api;
mod config;
mod domain;
mod error;
mod logging;
mod storage;

use crate::api::build_router;
use crate::config::Config;
use crate::storage::IncidentRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Incident store, one per process.
    pub repository: IncidentRepository,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Logging is configured from the loaded config, so failures here go to stderr
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    logging::init(&config.logging);

    tracing::info!("Starting Incident Registry v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.url,
        log_format = ?config.logging.format,
        "Configuration loaded"
    );

    let repository = IncidentRepository::connect(&config.database.url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            anyhow::anyhow!("Database connection error: {}", e)
        })?;

    // Schema and seed data must exist before the first request
    repository.initialize().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize database schema");
        anyhow::anyhow!("Schema initialization error: {}", e)
    })?;

    tracing::info!("Database connected and schema initialized");

    let state = AppState { repository };
    let app = build_router(state, config.server.index_file());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("OpenAPI document available at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
