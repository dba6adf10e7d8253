//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the one `ReportStore` behind a `tokio::sync::RwLock`: reads share
//! the lock, and every mutation (save, delete, duplicate) takes the write
//! half because the repository rewrites the whole collection.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use layout::repository::{FileRepository, MemoryRepository, Repository};
use layout::store::ReportStore;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{ServerConfig, StoreKind};

pub type SharedStore = Arc<RwLock<ReportStore<Box<dyn Repository>>>>;

/// Shared application state. Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    #[must_use]
    pub fn new(repo: Box<dyn Repository>) -> Self {
        Self::with_store(ReportStore::new(repo))
    }

    #[must_use]
    pub fn with_store(store: ReportStore<Box<dyn Repository>>) -> Self {
        Self { store: Arc::new(RwLock::new(store)) }
    }

    /// Build state with the repository `config` selects.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let repo: Box<dyn Repository> = match config.store {
            StoreKind::File => {
                info!(path = %config.reports_path.display(), "using file report store");
                Box::new(FileRepository::new(config.reports_path.clone()))
            }
            StoreKind::Memory => {
                info!("using in-memory report store");
                Box::new(MemoryRepository::new())
            }
        };
        Self::new(repo)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
