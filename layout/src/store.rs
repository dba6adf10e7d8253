//! Report store: save, list, delete, duplicate, and export over a repository.
//!
//! DESIGN
//! ======
//! The store validates input before touching the repository, builds every
//! new document in full, then hands it over in a single `append` or
//! `replace`. A storage failure is therefore reported once, with nothing
//! partially written and the caller's canvas untouched.
//!
//! ERROR HANDLING
//! ==============
//! Blank names fail with `ReportError::NameRequired`. Unknown report ids
//! fail with `ReportError::NotFound`. Repository failures pass through as
//! `ReportError::Storage`. Nothing is retried.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::{error, info};

use crate::canvas::Canvas;
use crate::component::ReportComponent;
use crate::document::{ExportDocument, ReportDocument, normalize_name};
use crate::error::ErrorCode;
use crate::ids::{Clock, IdSource, RandomIds, SystemClock};
use crate::repository::{Repository, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("name required")]
    NameRequired,
    #[error("report not found: {0}")]
    NotFound(String),
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl ErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NameRequired => "E_NAME_REQUIRED",
            Self::NotFound(_) => "E_REPORT_NOT_FOUND",
            Self::Storage(_) => "E_STORAGE",
        }
    }
}

/// Saved-report operations over a [`Repository`].
pub struct ReportStore<R> {
    repo: R,
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
}

impl<R: Repository> ReportStore<R> {
    /// Wrap `repo` with random report ids and the system clock.
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self::with_sources(repo, Box::new(RandomIds), Box::new(SystemClock))
    }

    /// Wrap `repo` with explicit id and clock sources.
    #[must_use]
    pub fn with_sources(repo: R, ids: Box<dyn IdSource>, clock: Box<dyn Clock>) -> Self {
        Self { repo, ids, clock }
    }

    /// All saved reports, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Storage`] if the repository cannot be read.
    pub fn list(&self) -> Result<Vec<ReportDocument>, ReportError> {
        Ok(self.repo.list()?)
    }

    /// Fetch one saved report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] for an unknown id.
    pub fn get(&self, id: &str) -> Result<ReportDocument, ReportError> {
        self.repo
            .list()?
            .into_iter()
            .find(|doc| doc.id == id)
            .ok_or_else(|| ReportError::NotFound(id.to_owned()))
    }

    /// Snapshot `components` under `name` and append it to the collection.
    ///
    /// Saving twice under the same name stores two documents. A component id
    /// repeated in `components` is kept only at its first position.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NameRequired`] when `name` is blank, or
    /// [`ReportError::Storage`] when the append fails. Neither leaves a
    /// document behind.
    pub fn save(&mut self, name: &str, components: &[ReportComponent]) -> Result<ReportDocument, ReportError> {
        let name = normalize_name(name).ok_or(ReportError::NameRequired)?;
        let canvas = Canvas::from_components(components.to_vec());
        let doc = ReportDocument::snapshot(self.ids.next_id(), name, canvas.components(), self.clock.now());
        if let Err(e) = self.repo.append(doc.clone()) {
            error!(error = %e, name, "report save failed");
            return Err(e.into());
        }
        info!(id = %doc.id, name, components = doc.components.len(), "report saved");
        Ok(doc)
    }

    /// Remove a saved report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] for an unknown id, or
    /// [`ReportError::Storage`] when the rewrite fails.
    pub fn delete(&mut self, id: &str) -> Result<(), ReportError> {
        let all = self.repo.list()?;
        let before = all.len();
        let kept: Vec<ReportDocument> = all.into_iter().filter(|doc| doc.id != id).collect();
        if kept.len() == before {
            return Err(ReportError::NotFound(id.to_owned()));
        }
        self.repo.replace(kept)?;
        info!(id, "report deleted");
        Ok(())
    }

    /// Append a copy of a saved report under a new id.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] for an unknown id, or
    /// [`ReportError::Storage`] when the append fails.
    pub fn duplicate(&mut self, id: &str) -> Result<ReportDocument, ReportError> {
        let source = self.get(id)?;
        let copy = source.duplicate(self.ids.next_id(), self.clock.now());
        self.repo.append(copy.clone())?;
        info!(source = id, id = %copy.id, "report duplicated");
        Ok(copy)
    }

    /// Export a saved report as a downloadable document.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] for an unknown id.
    pub fn export(&self, id: &str) -> Result<ExportDocument, ReportError> {
        let doc = self.get(id)?;
        Ok(ExportDocument::from_document(&doc, self.clock.now()))
    }

    /// Export unsaved components. Never touches the repository.
    #[must_use]
    pub fn export_components(&self, name: &str, components: &[ReportComponent]) -> ExportDocument {
        ExportDocument::new(name, components, self.clock.now())
    }
}
