//! Reference-list routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use suivi_shared::AppError;
use suivi_store::ReferenceKind;
use tracing::error;

use crate::AppState;

use super::error_response;

/// Creates the reference routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/references/{kind}", get(get_reference))
}

/// GET /references/{kind} - one cached reference list.
async fn get_reference(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    let Some(kind) = ReferenceKind::from_path(&kind) else {
        return error_response(&AppError::NotFound(format!("unknown reference list: {kind}")));
    };

    match state.references.get(kind).await {
        Ok(list) => Json(list.as_ref().clone()).into_response(),
        Err(e) => {
            error!(error = %e, table = kind.table(), "Failed to load reference list");
            error_response(&AppError::ExternalService(e.to_string()))
        }
    }
}
