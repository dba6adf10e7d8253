use axum::body::to_bytes;
use layout::catalog::DataSourceId;
use layout::component::{ChartVariant, ComponentKind};
use layout::repository::{Repository, StorageError};
use uuid::Uuid;

use super::*;
use crate::state::test_helpers::test_app_state;

fn make_component(n: u128, kind: ComponentKind) -> ReportComponent {
    ReportComponent::new(Uuid::from_u128(n), kind, None, "Widget", DataSourceId::Maintenance)
}

fn save_body(name: &str, components: Vec<ReportComponent>) -> Json<SaveReportBody> {
    Json(SaveReportBody { name: name.to_owned(), components })
}

async fn seed(state: &AppState, name: &str) -> ReportDocument {
    let (_, Json(doc)) = save_report(State(state.clone()), save_body(name, vec![make_component(1, ComponentKind::Table)]))
        .await
        .unwrap();
    doc
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

struct BrokenRepository;

impl Repository for BrokenRepository {
    fn list(&self) -> Result<Vec<ReportDocument>, StorageError> {
        Err(StorageError::Io(std::io::Error::other("unreadable")))
    }

    fn append(&mut self, _doc: ReportDocument) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("unwritable")))
    }

    fn replace(&mut self, _all: Vec<ReportDocument>) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("unwritable")))
    }
}

// =============================================================
// Error mapping
// =============================================================

#[test]
fn report_error_to_status_maps_name_required() {
    assert_eq!(report_error_to_status(ReportError::NameRequired), StatusCode::BAD_REQUEST);
}

#[test]
fn report_error_to_status_maps_not_found() {
    assert_eq!(report_error_to_status(ReportError::NotFound("report-x".into())), StatusCode::NOT_FOUND);
}

#[test]
fn report_error_to_status_maps_storage() {
    let err = ReportError::Storage(StorageError::Io(std::io::Error::other("boom")));
    assert_eq!(report_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================
// Save / list / get
// =============================================================

#[tokio::test]
async fn save_then_list_and_get() {
    let state = test_app_state();
    let doc = seed(&state, "Q1 Report").await;
    assert_eq!(doc.name, "Q1 Report");
    assert_eq!(doc.description, "Custom report with 1 components");

    let Json(listed) = list_reports(State(state.clone())).await.unwrap();
    assert_eq!(listed, vec![doc.clone()]);

    let Json(fetched) = get_report(State(state), Path(doc.id.clone())).await.unwrap();
    assert_eq!(fetched, doc);
}

#[tokio::test]
async fn save_blank_name_is_bad_request() {
    let state = test_app_state();
    let result = save_report(State(state.clone()), save_body("   ", Vec::new())).await;
    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
    let Json(listed) = list_reports(State(state)).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn save_drops_duplicate_component_ids() {
    let state = test_app_state();
    let body = save_body("Dupes", vec![make_component(1, ComponentKind::Table), make_component(1, ComponentKind::Metric)]);
    let (status, Json(doc)) = save_report(State(state), body).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(doc.components.len(), 1);
    assert_eq!(doc.components[0].kind, ComponentKind::Table);
}

#[tokio::test]
async fn save_rejects_chart_variant_on_table() {
    let state = test_app_state();
    let mut bad = make_component(1, ComponentKind::Table);
    bad.chart_variant = Some(ChartVariant::Pie);
    let result = save_report(State(state), save_body("Bad", vec![bad])).await;
    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let state = test_app_state();
    let result = get_report(State(state), Path("report-missing".into())).await;
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn broken_repository_is_internal_error() {
    let state = AppState::new(Box::new(BrokenRepository));
    assert_eq!(list_reports(State(state.clone())).await.unwrap_err(), StatusCode::INTERNAL_SERVER_ERROR);
    let result = save_report(State(state), save_body("Q1", Vec::new())).await;
    assert_eq!(result.unwrap_err(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================
// Delete / duplicate
// =============================================================

#[tokio::test]
async fn delete_removes_report() {
    let state = test_app_state();
    let doc = seed(&state, "Gone").await;
    let Json(ok) = delete_report(State(state.clone()), Path(doc.id.clone())).await.unwrap();
    assert_eq!(ok, serde_json::json!({ "ok": true }));
    assert_eq!(get_report(State(state), Path(doc.id)).await.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_is_not_found() {
    let state = test_app_state();
    seed(&state, "Stays").await;
    let result = delete_report(State(state.clone()), Path("report-nope".into())).await;
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
    let Json(listed) = list_reports(State(state)).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn duplicate_creates_copy() {
    let state = test_app_state();
    let doc = seed(&state, "Audit").await;
    let (status, Json(copy)) = duplicate_report(State(state.clone()), Path(doc.id.clone())).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy.name, "Audit (Copy)");
    assert_ne!(copy.id, doc.id);
    let Json(listed) = list_reports(State(state)).await.unwrap();
    assert_eq!(listed.len(), 2);
}

// =============================================================
// Export
// =============================================================

#[tokio::test]
async fn export_saved_report_as_attachment() {
    let state = test_app_state();
    let doc = seed(&state, "Q1 Report").await;
    let response = export_report(State(state), Path(doc.id)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(response.headers()[CONTENT_DISPOSITION], "attachment; filename=\"q1_report.json\"");

    let value = body_json(response).await;
    assert_eq!(value["name"], "Q1 Report");
    assert_eq!(value["exportedAt"], "2025-03-01T12:00:00Z");
    assert_eq!(value["components"].as_array().unwrap().len(), 1);
    assert!(value.get("id").is_none());
}

#[tokio::test]
async fn export_unknown_is_not_found() {
    let state = test_app_state();
    let result = export_report(State(state), Path("report-nope".into())).await;
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_draft_blank_name_uses_placeholder() {
    let state = test_app_state();
    let body = Json(ExportDraftBody { name: String::new(), components: vec![make_component(9, ComponentKind::Metric)] });
    let response = export_draft(State(state.clone()), body).await.unwrap();
    assert_eq!(response.headers()[CONTENT_DISPOSITION], "attachment; filename=\"untitled_report.json\"");

    let value = body_json(response).await;
    assert_eq!(value["name"], "Untitled Report");

    let Json(listed) = list_reports(State(state)).await.unwrap();
    assert!(listed.is_empty());
}
