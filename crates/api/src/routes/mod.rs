//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod analysis;
pub mod health;
pub mod references;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(analysis::routes())
        .merge(references::routes())
}

/// Builds the standard error response body.
pub(crate) fn error_response(error: &suivi_shared::AppError) -> axum::response::Response {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": error.to_string(),
        })),
    )
        .into_response()
}
