//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the budget-vs-actuals analysis
//! - CSV and print-ready exports of the computed rows
//! - Cached reference-list endpoints

pub mod routes;


use std::sync::Arc;

use axum::Router;
use suivi_store::{AnalysisSession, ReferenceCache};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Analysis fetch coordinator with the per-viewer stale-response guard.
    pub session: Arc<AnalysisSession>,
    /// Session-scoped reference-list cache.
    pub references: Arc<ReferenceCache>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .merge(routes::health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
