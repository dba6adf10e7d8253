use std::path::PathBuf;

use uuid::Uuid;

use super::*;

fn make_config(store: StoreKind, reports_path: PathBuf) -> ServerConfig {
    ServerConfig { port: 0, reports_path, store }
}

#[tokio::test]
async fn memory_config_starts_empty() {
    let state = AppState::from_config(&make_config(StoreKind::Memory, PathBuf::from("unused.json")));
    assert!(state.store.read().await.list().unwrap().is_empty());
}

#[tokio::test]
async fn file_config_persists_saves() {
    let dir = std::env::temp_dir().join(format!("report-server-{}", Uuid::new_v4()));
    let path = dir.join("reports.json");
    let state = AppState::from_config(&make_config(StoreKind::File, path.clone()));

    let saved = state.store.write().await.save("Disk", &[]).unwrap();
    assert!(path.exists());

    let reopened = AppState::from_config(&make_config(StoreKind::File, path));
    let listed = reopened.store.read().await.list().unwrap();
    assert_eq!(listed, vec![saved]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn clones_share_one_store() {
    let state = test_helpers::test_app_state();
    let other = state.clone();
    state.store.write().await.save("Shared", &[]).unwrap();
    assert_eq!(other.store.read().await.list().unwrap().len(), 1);
}
