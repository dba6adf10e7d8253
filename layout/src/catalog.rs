//! Static catalogs consumed by the report builder.
//!
//! The data-source catalog names each queryable record type and its fields;
//! the chart-type catalog names each chart variant. Both are fixed at build
//! time and shared by the editor, the palette, and API consumers.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

use crate::component::ChartVariant;

/// Identifier of an entry in the data-source catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceId {
    /// Registered devices across facilities.
    #[default]
    Devices,
    /// Scheduled and completed maintenance work.
    Maintenance,
    /// Open and resolved service tickets.
    ServiceRequests,
    /// Regulatory compliance records and audits.
    Compliance,
}

/// One queryable record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataSource {
    pub id: DataSourceId,
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

/// One chart style offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartType {
    pub id: ChartVariant,
    pub name: &'static str,
}

/// The data-source catalog. The first entry is the insertion default.
pub const DATA_SOURCES: &[DataSource] = &[
    DataSource {
        id: DataSourceId::Devices,
        name: "Devices",
        fields: &["name", "type", "manufacturer", "model", "serial_number", "status", "location", "purchase_date"],
    },
    DataSource {
        id: DataSourceId::Maintenance,
        name: "Maintenance Records",
        fields: &["device_id", "type", "scheduled_date", "completed_date", "technician", "status", "cost"],
    },
    DataSource {
        id: DataSourceId::ServiceRequests,
        name: "Service Requests",
        fields: &["device_id", "priority", "status", "requested_by", "created_at", "resolved_at"],
    },
    DataSource {
        id: DataSourceId::Compliance,
        name: "Compliance",
        fields: &["device_id", "standard", "status", "last_audit", "next_audit", "auditor"],
    },
];

/// The chart-type catalog.
pub const CHART_TYPES: &[ChartType] = &[
    ChartType { id: ChartVariant::Bar, name: "Bar Chart" },
    ChartType { id: ChartVariant::Line, name: "Line Chart" },
    ChartType { id: ChartVariant::Pie, name: "Pie Chart" },
    ChartType { id: ChartVariant::Area, name: "Area Chart" },
];

/// Look up a data source by id.
#[must_use]
pub fn data_source(id: DataSourceId) -> Option<&'static DataSource> {
    DATA_SOURCES.iter().find(|s| s.id == id)
}

/// The catalog's first data source, used as the default for new components.
#[must_use]
pub fn default_data_source() -> DataSourceId {
    DATA_SOURCES.first().map_or_else(DataSourceId::default, |s| s.id)
}

/// Whether `field` is listed for `source`.
#[must_use]
pub fn has_field(source: DataSourceId, field: &str) -> bool {
    data_source(source).is_some_and(|s| s.fields.contains(&field))
}
