//! Budget-vs-actuals analysis routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use suivi_core::analysis::{Analysis, AnalysisFilters, AnalysisService};
use suivi_core::export::{csv_filename, print_document, write_csv};
use suivi_core::plan::PlanType;
use suivi_shared::{AppError, FilialeId};
use tracing::error;

use crate::AppState;

use super::error_response;

/// Header identifying one open report view; scopes the stale-load guard
/// so concurrent viewers never supersede each other.
const VIEWER_HEADER: &str = "x-viewer-id";

/// Creates the analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analysis", get(get_analysis))
        .route("/analysis/export", get(export_analysis))
        .route("/analysis/print", get(print_analysis))
}

/// Query parameters shared by all analysis routes.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Analyzed year. `annee` is accepted for callers using the store's
    /// column naming.
    #[serde(alias = "annee")]
    pub year: i32,
    /// Optional plan-type filter: revenue, margin, or quantity.
    pub plan: Option<String>,
    /// Optional manufacturer filter.
    pub constructeur: Option<String>,
    /// Optional product filter.
    pub produit: Option<String>,
    /// Optional filiale filter.
    pub filiale: Option<FilialeId>,
}

impl AnalysisQuery {
    /// Converts the raw query into analysis filters.
    fn into_filters(self) -> Result<AnalysisFilters, Response> {
        let plan = match self.plan.as_deref() {
            None | Some("") => None,
            Some(raw) => match PlanType::parse(raw) {
                Some(plan) => Some(plan),
                None => {
                    return Err(error_response(&AppError::Validation(format!(
                        "unknown plan type: {raw}"
                    ))));
                }
            },
        };

        Ok(AnalysisFilters {
            year: self.year,
            plan,
            manufacturer: self.constructeur.filter(|s| !s.is_empty()),
            product: self.produit.filter(|s| !s.is_empty()),
            filiale: self.filiale,
        })
    }
}

/// Loads inputs and computes the analysis for the given filters.
async fn compute(
    state: &AppState,
    headers: &HeaderMap,
    query: AnalysisQuery,
) -> Result<Analysis, Response> {
    let filters = query.into_filters()?;
    let viewer = headers
        .get(VIEWER_HEADER)
        .and_then(|value| value.to_str().ok());

    let inputs = match state.session.load(viewer, filters.year, filters.filiale).await {
        Ok(Some(inputs)) => inputs,
        Ok(None) => {
            return Err(error_response(&AppError::Superseded(
                "a newer request from the same viewer superseded this one".into(),
            )));
        }
        Err(e) => {
            error!(error = %e, "Failed to load analysis inputs");
            return Err(error_response(&AppError::ExternalService(e.to_string())));
        }
    };

    let labels = match state.references.filiale_labels().await {
        Ok(labels) => labels,
        Err(e) => {
            error!(error = %e, "Failed to load filiale labels");
            return Err(error_response(&AppError::ExternalService(e.to_string())));
        }
    };

    let as_of = chrono::Utc::now().date_naive();
    Ok(AnalysisService::compute(
        &inputs.budgets,
        &inputs.sales,
        &filters,
        &labels,
        as_of,
    ))
}

/// GET /analysis - computed rows, group totals, and variance highlights.
async fn get_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    match compute(&state, &headers, query).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(response) => response,
    }
}

/// GET /analysis/export - CSV attachment named `budget_suivi_<year>.csv`.
async fn export_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    let analysis = match compute(&state, &headers, query).await {
        Ok(analysis) => analysis,
        Err(response) => return response,
    };

    match write_csv(&analysis.rows) {
        Ok(body) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                csv_filename(analysis.year)
            );
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize CSV export");
            error_response(&AppError::Internal(e.to_string()))
        }
    }
}

/// GET /analysis/print - print-ready HTML table that auto-invokes the
/// browser print dialog.
async fn print_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    match compute(&state, &headers, query).await {
        Ok(analysis) => Html(print_document(&analysis)).into_response(),
        Err(response) => response,
    }
}
