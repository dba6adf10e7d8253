//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the report API under a single Axum router. Saved
//! reports live under `/api/reports`, the static catalogs the builder's
//! palette and properties panel read from live under `/api/catalog` and
//! `/api/palette`.

pub mod catalog;
pub mod reports;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// All HTTP routes with CORS and request tracing applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/reports", get(reports::list_reports).post(reports::save_report))
        .route("/api/reports/export", post(reports::export_draft))
        .route("/api/reports/{id}", get(reports::get_report).delete(reports::delete_report))
        .route("/api/reports/{id}/duplicate", post(reports::duplicate_report))
        .route("/api/reports/{id}/export", get(reports::export_report))
        .route("/api/catalog/data-sources", get(catalog::data_sources))
        .route("/api/catalog/chart-types", get(catalog::chart_types))
        .route("/api/palette", get(catalog::palette))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
