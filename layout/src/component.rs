//! Report components: the typed building blocks placed on the canvas.
//!
//! This module defines the record for one visual block of a report
//! (`ReportComponent`), its fixed kind and chart variant enums, the filter
//! criteria attached to it (`FilterCriterion`), and sparse-update types used
//! by the properties panel (`PartialReportComponent`, `PartialFilter`).
//!
//! Records flow in from palette insertion and stored documents, and out to
//! document snapshots and exports. Their position on the canvas is the only
//! ordering signal, so nothing here carries a sort key.

#[cfg(test)]
#[path = "component_test.rs"]
mod component_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::DataSourceId;

/// Unique identifier for a report component.
pub type ComponentId = Uuid;

/// Unique identifier for a filter criterion within a component.
pub type FilterId = Uuid;

/// The kind of a report component. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// A chart over one data source; carries a [`ChartVariant`].
    Chart,
    /// A tabular listing of records.
    Table,
    /// A single headline number.
    Metric,
    /// A filter control that narrows the other components.
    Filter,
}

/// Visual style of a chart component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
}

/// Comparison applied by a filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    #[default]
    Equals,
    Contains,
    Greater,
    Less,
    Between,
}

/// One filter criterion attached to a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub id: FilterId,
    /// Field name from the component's data source.
    pub field: String,
    pub operator: FilterOperator,
    /// Operand; a two-element array for `between`, otherwise a scalar.
    pub value: serde_json::Value,
}

/// Sparse update for a filter criterion. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// A report component as held on the canvas and in stored documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportComponent {
    /// Unique identifier, stable for the component's lifetime.
    pub id: ComponentId,
    /// Component kind; never changes after creation.
    pub kind: ComponentKind,
    /// Chart style. Present only when `kind` is [`ComponentKind::Chart`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_variant: Option<ChartVariant>,
    /// Display title shown above the block.
    pub title: String,
    /// Catalog entry the component queries.
    pub data_source_id: DataSourceId,
    /// Ordered filter criteria.
    #[serde(default)]
    pub filters: Vec<FilterCriterion>,
    /// Open-ended extension bag, unvalidated.
    #[serde(default = "empty_config")]
    pub config: serde_json::Value,
}

/// Sparse update for a report component. Only present fields are applied.
///
/// `id` and `kind` are deliberately absent: neither may change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialReportComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_id: Option<DataSourceId>,
    /// Ignored unless the target is a chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_variant: Option<ChartVariant>,
    /// Replaces the whole filter list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterCriterion>>,
    /// Config keys to merge or remove (null values delete keys).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl PartialReportComponent {
    /// Update carrying only a new title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.data_source_id.is_none()
            && self.chart_variant.is_none()
            && self.filters.is_none()
            && self.config.is_none()
    }
}

fn empty_config() -> serde_json::Value {
    serde_json::json!({})
}

impl ReportComponent {
    /// Build a component, normalizing the chart variant against `kind`.
    ///
    /// Charts without a variant get the default bar style; non-charts never
    /// keep one.
    #[must_use]
    pub fn new(
        id: ComponentId,
        kind: ComponentKind,
        chart_variant: Option<ChartVariant>,
        title: impl Into<String>,
        data_source_id: DataSourceId,
    ) -> Self {
        let chart_variant = match kind {
            ComponentKind::Chart => Some(chart_variant.unwrap_or_default()),
            _ => None,
        };
        Self { id, kind, chart_variant, title: title.into(), data_source_id, filters: Vec::new(), config: empty_config() }
    }

    /// Whether the chart variant agrees with the kind and filter ids are unique.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let variant_ok = (self.kind == ComponentKind::Chart) == self.chart_variant.is_some();
        variant_ok && unique_filter_ids(&self.filters)
    }

    /// Merge a sparse update into this component.
    ///
    /// The update is rejected as a whole (returns `false`, nothing applied)
    /// when `config` is present but not a JSON object, or when `filters`
    /// repeats a filter id.
    pub fn apply_partial(&mut self, partial: &PartialReportComponent) -> bool {
        if let Some(ref config) = partial.config {
            if !config.is_object() {
                return false;
            }
        }
        if let Some(ref filters) = partial.filters {
            if !unique_filter_ids(filters) {
                return false;
            }
        }

        if let Some(ref title) = partial.title {
            self.title.clone_from(title);
        }
        if let Some(source) = partial.data_source_id {
            self.data_source_id = source;
        }
        if let Some(variant) = partial.chart_variant {
            if self.kind == ComponentKind::Chart {
                self.chart_variant = Some(variant);
            }
        }
        if let Some(ref filters) = partial.filters {
            self.filters.clone_from(filters);
        }
        if let Some(serde_json::Value::Object(ref incoming)) = partial.config {
            if !self.config.is_object() {
                self.config = empty_config();
            }
            if let Some(existing) = self.config.as_object_mut() {
                for (k, v) in incoming {
                    if v.is_null() {
                        existing.remove(k);
                    } else {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        true
    }

    /// Look up a filter by id.
    #[must_use]
    pub fn filter(&self, id: &FilterId) -> Option<&FilterCriterion> {
        self.filters.iter().find(|f| f.id == *id)
    }

    /// Append a filter criterion.
    pub fn push_filter(&mut self, filter: FilterCriterion) {
        self.filters.push(filter);
    }

    /// Apply a sparse update to one filter. Returns false if the filter doesn't exist.
    pub fn apply_filter_partial(&mut self, id: &FilterId, partial: &PartialFilter) -> bool {
        let Some(filter) = self.filters.iter_mut().find(|f| f.id == *id) else {
            return false;
        };
        if let Some(ref field) = partial.field {
            filter.field.clone_from(field);
        }
        if let Some(operator) = partial.operator {
            filter.operator = operator;
        }
        if let Some(ref value) = partial.value {
            filter.value = value.clone();
        }
        true
    }

    /// Remove a filter by id, returning it if it was present.
    pub fn remove_filter(&mut self, id: &FilterId) -> Option<FilterCriterion> {
        let index = self.filters.iter().position(|f| f.id == *id)?;
        Some(self.filters.remove(index))
    }
}

fn unique_filter_ids(filters: &[FilterCriterion]) -> bool {
    filters.iter().enumerate().all(|(i, f)| filters[..i].iter().all(|g| g.id != f.id))
}
