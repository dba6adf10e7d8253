//! Storage capability for saved reports, with in-memory and file backends.
//!
//! DESIGN
//! ======
//! The unit of mutation is the whole collection: callers append one document
//! or replace the full list. `FileRepository` keeps the collection as one
//! JSON array and writes it through a temp file plus rename, so a failed
//! write never leaves a half-written collection behind.

#[cfg(test)]
#[path = "repository_test.rs"]
mod repository_test;

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, error};

use crate::document::ReportDocument;
use crate::error::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_STORAGE_IO",
            Self::Serde(_) => "E_STORAGE_ENCODING",
        }
    }
}

/// Persisted collection of saved reports.
pub trait Repository: Send + Sync {
    /// All saved reports, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read.
    fn list(&self) -> Result<Vec<ReportDocument>, StorageError>;

    /// Add one report to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write fails; the collection is unchanged.
    fn append(&mut self, doc: ReportDocument) -> Result<(), StorageError>;

    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write fails; the collection is unchanged.
    fn replace(&mut self, all: Vec<ReportDocument>) -> Result<(), StorageError>;
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn list(&self) -> Result<Vec<ReportDocument>, StorageError> {
        (**self).list()
    }

    fn append(&mut self, doc: ReportDocument) -> Result<(), StorageError> {
        (**self).append(doc)
    }

    fn replace(&mut self, all: Vec<ReportDocument>) -> Result<(), StorageError> {
        (**self).replace(all)
    }
}

/// Repository held entirely in memory. Used by tests and the `memory` store mode.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    docs: Vec<ReportDocument>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing documents.
    #[must_use]
    pub fn with_documents(docs: Vec<ReportDocument>) -> Self {
        Self { docs }
    }
}

impl Repository for MemoryRepository {
    fn list(&self) -> Result<Vec<ReportDocument>, StorageError> {
        Ok(self.docs.clone())
    }

    fn append(&mut self, doc: ReportDocument) -> Result<(), StorageError> {
        self.docs.push(doc);
        Ok(())
    }

    fn replace(&mut self, all: Vec<ReportDocument>) -> Result<(), StorageError> {
        self.docs = all;
        Ok(())
    }
}

/// Repository backed by a single JSON array file.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Use the file at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_all(&self, docs: &[ReportDocument]) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(docs)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        fs::write(&tmp, raw)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            error!(error = %e, path = %self.path.display(), "report store rename failed");
            if let Err(cleanup) = fs::remove_file(&tmp) {
                debug!(error = %cleanup, "temp file cleanup failed");
            }
            return Err(e.into());
        }
        debug!(path = %self.path.display(), count = docs.len(), "report store written");
        Ok(())
    }
}

impl Repository for FileRepository {
    fn list(&self) -> Result<Vec<ReportDocument>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn append(&mut self, doc: ReportDocument) -> Result<(), StorageError> {
        let mut all = self.list()?;
        all.push(doc);
        self.write_all(&all)
    }

    fn replace(&mut self, all: Vec<ReportDocument>) -> Result<(), StorageError> {
        self.write_all(&all)
    }
}
