//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::AppState;

/// GET /health - liveness for deployment checks. Does not touch the
/// store; a broken store surfaces as 502 on the analysis routes instead.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "suivi",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Creates the liveness route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
