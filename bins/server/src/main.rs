//! Suivi API Server
//!
//! Main entry point for the Suivi reporting backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use suivi_api::{AppState, create_router};
use suivi_shared::AppConfig;
use suivi_store::{AnalysisSession, ReferenceCache, StoreClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "suivi=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Create the data-store client
    let client = Arc::new(StoreClient::new(&config.store)?);
    info!(base_url = %config.store.base_url, "Data-store client configured");

    // Create application state
    let state = AppState {
        session: Arc::new(AnalysisSession::new(Arc::clone(&client))),
        references: Arc::new(ReferenceCache::new(client)),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
