//! Static catalog routes: data sources, chart types, and the palette.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use axum::response::Json;
use layout::catalog::{CHART_TYPES, ChartType, DATA_SOURCES, DataSource};
use layout::palette::{ComponentTemplate, PALETTE};

/// `GET /api/catalog/data-sources`: data sources with their field lists.
pub async fn data_sources() -> Json<&'static [DataSource]> {
    Json(DATA_SOURCES)
}

/// `GET /api/catalog/chart-types`: chart variants with display names.
pub async fn chart_types() -> Json<&'static [ChartType]> {
    Json(CHART_TYPES)
}

/// `GET /api/palette`: component templates in display order.
pub async fn palette() -> Json<&'static [ComponentTemplate]> {
    Json(PALETTE)
}
