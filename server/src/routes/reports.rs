//! Saved-report routes.
//!
//! ERROR HANDLING
//! ==============
//! Every handler maps `ReportError` through `report_error_to_status`:
//! validation failures are 400, unknown ids are 404, and repository
//! failures are 500. Bodies carry no error detail; the stable error code
//! goes to the log.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use layout::canvas::Canvas;
use layout::component::ReportComponent;
use layout::document::{ExportDocument, ReportDocument};
use layout::error::ErrorCode;
use layout::store::ReportError;
use serde::Deserialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveReportBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub components: Vec<ReportComponent>,
}

#[derive(Debug, Deserialize)]
pub struct ExportDraftBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub components: Vec<ReportComponent>,
}

/// `GET /api/reports`: list saved reports, oldest first.
pub async fn list_reports(State(state): State<AppState>) -> Result<Json<Vec<ReportDocument>>, StatusCode> {
    let docs = state.store.read().await.list().map_err(report_error_to_status)?;
    Ok(Json(docs))
}

/// `GET /api/reports/:id`: fetch one saved report.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportDocument>, StatusCode> {
    let doc = state.store.read().await.get(&id).map_err(report_error_to_status)?;
    Ok(Json(doc))
}

/// `POST /api/reports`: snapshot a canvas as a new saved report.
pub async fn save_report(
    State(state): State<AppState>,
    Json(body): Json<SaveReportBody>,
) -> Result<(StatusCode, Json<ReportDocument>), StatusCode> {
    let canvas = checked_canvas(body.components)?;
    let doc = state
        .store
        .write()
        .await
        .save(&body.name, canvas.components())
        .map_err(report_error_to_status)?;
    Ok((StatusCode::CREATED, Json(doc)))
}

/// `DELETE /api/reports/:id`: remove a saved report.
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    state.store.write().await.delete(&id).map_err(report_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/reports/:id/duplicate`: store a copy under a new id.
pub async fn duplicate_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ReportDocument>), StatusCode> {
    let copy = state.store.write().await.duplicate(&id).map_err(report_error_to_status)?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// `GET /api/reports/:id/export`: download a saved report as a JSON file.
pub async fn export_report(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, StatusCode> {
    let export = state.store.read().await.export(&id).map_err(report_error_to_status)?;
    attachment(&export)
}

/// `POST /api/reports/export`: download an unsaved canvas as a JSON file.
pub async fn export_draft(
    State(state): State<AppState>,
    Json(body): Json<ExportDraftBody>,
) -> Result<Response, StatusCode> {
    let canvas = checked_canvas(body.components)?;
    let export = state.store.read().await.export_components(&body.name, canvas.components());
    attachment(&export)
}

/// Build a canvas from submitted components, rejecting inconsistent ones.
///
/// Later duplicates of a component id are dropped.
fn checked_canvas(components: Vec<ReportComponent>) -> Result<Canvas, StatusCode> {
    if let Some(bad) = components.iter().find(|c| !c.is_consistent()) {
        warn!(id = %bad.id, kind = ?bad.kind, "rejecting inconsistent component");
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Canvas::from_components(components))
}

fn attachment(export: &ExportDocument) -> Result<Response, StatusCode> {
    let body = serde_json::to_string_pretty(export).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename());
    Ok(([(CONTENT_TYPE, "application/json".to_owned()), (CONTENT_DISPOSITION, disposition)], body).into_response())
}

pub(crate) fn report_error_to_status(err: ReportError) -> StatusCode {
    match err {
        ReportError::NameRequired => StatusCode::BAD_REQUEST,
        ReportError::NotFound(_) => StatusCode::NOT_FOUND,
        ReportError::Storage(ref e) => {
            warn!(error = %e, code = err.error_code(), "report storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
