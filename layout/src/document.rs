//! Report documents: the persisted snapshot and the looser export shape.
//!
//! DESIGN
//! ======
//! A `ReportDocument` is what the repository stores. Its `layout` array (the
//! component ids in order) is never held as a field: it is projected from
//! `components` when the document is serialized and discarded when one is
//! read back, so the two can never drift apart.
//!
//! An `ExportDocument` is what a user downloads. It carries no id and no
//! layout and is kept as a distinct type so the two formats cannot be
//! confused at a call site.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::component::{ComponentId, ReportComponent};
use crate::consts::{COPY_SUFFIX, EXPORT_EXTENSION, REPORT_ID_PREFIX, UNTITLED_REPORT_NAME};

/// A saved report as held by a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredDocument", from = "StoredDocument")]
pub struct ReportDocument {
    /// `"report-<uuid>"`.
    pub id: String,
    pub name: String,
    /// Derived from the component count at save time.
    pub description: String,
    pub components: Vec<ReportComponent>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// On-disk / on-wire form of [`ReportDocument`], including the projected layout.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    components: Vec<ReportComponent>,
    #[serde(default)]
    layout: Vec<ComponentId>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<ReportDocument> for StoredDocument {
    fn from(doc: ReportDocument) -> Self {
        let layout = doc.layout();
        Self {
            id: doc.id,
            name: doc.name,
            description: doc.description,
            components: doc.components,
            layout,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

impl From<StoredDocument> for ReportDocument {
    fn from(stored: StoredDocument) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            description: stored.description,
            components: stored.components,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

impl ReportDocument {
    /// Snapshot `components` into a new document stamped at `now`.
    ///
    /// `name` is stored as given; callers validate it first with
    /// [`normalize_name`].
    #[must_use]
    pub fn snapshot(id: Uuid, name: &str, components: &[ReportComponent], now: OffsetDateTime) -> Self {
        Self {
            id: report_id(id),
            name: name.to_owned(),
            description: describe(components.len()),
            components: components.to_vec(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Component ids in order.
    #[must_use]
    pub fn layout(&self) -> Vec<ComponentId> {
        self.components.iter().map(|c| c.id).collect()
    }

    /// A copy under a new id, named `"<name> (Copy)"` and stamped at `now`.
    #[must_use]
    pub fn duplicate(&self, id: Uuid, now: OffsetDateTime) -> Self {
        Self {
            id: report_id(id),
            name: format!("{}{COPY_SUFFIX}", self.name),
            description: self.description.clone(),
            components: self.components.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A downloadable report file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub name: String,
    pub components: Vec<ReportComponent>,
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
}

impl ExportDocument {
    /// Export `components` under `name`, falling back to a placeholder name
    /// when it is blank.
    #[must_use]
    pub fn new(name: &str, components: &[ReportComponent], now: OffsetDateTime) -> Self {
        let name = normalize_name(name).unwrap_or(UNTITLED_REPORT_NAME);
        Self { name: name.to_owned(), components: components.to_vec(), exported_at: now }
    }

    /// Export a stored document.
    #[must_use]
    pub fn from_document(doc: &ReportDocument, now: OffsetDateTime) -> Self {
        Self::new(&doc.name, &doc.components, now)
    }

    /// Suggested download filename for this export.
    #[must_use]
    pub fn filename(&self) -> String {
        export_filename(&self.name)
    }
}

/// Trimmed report name, or `None` when nothing but whitespace was entered.
#[must_use]
pub fn normalize_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// `"Custom report with N components"`.
#[must_use]
pub fn describe(count: usize) -> String {
    format!("Custom report with {count} components")
}

/// Lowercased name with every non-alphanumeric character replaced by `_`.
#[must_use]
pub fn export_filename(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{stem}.{EXPORT_EXTENSION}")
}

fn report_id(id: Uuid) -> String {
    format!("{REPORT_ID_PREFIX}{id}")
}
