//! Palette templates and component instantiation.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::Serialize;

use crate::catalog::default_data_source;
use crate::component::{ChartVariant, ComponentId, ComponentKind, ReportComponent};
use crate::error::LayoutError;

/// A read-only template the user drags from the palette onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTemplate {
    /// Display name; becomes the new component's title.
    pub name: &'static str,
    pub kind: ComponentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_variant: Option<ChartVariant>,
}

impl ComponentTemplate {
    /// Build a fresh component from this template.
    ///
    /// The component takes the catalog's default data source and starts with
    /// no filters and an empty config.
    #[must_use]
    pub fn instantiate(&self, id: ComponentId) -> ReportComponent {
        ReportComponent::new(id, self.kind, self.chart_variant, self.name, default_data_source())
    }
}

/// The fixed palette, in display order.
pub const PALETTE: &[ComponentTemplate] = &[
    ComponentTemplate { name: "Bar Chart", kind: ComponentKind::Chart, chart_variant: Some(ChartVariant::Bar) },
    ComponentTemplate { name: "Line Chart", kind: ComponentKind::Chart, chart_variant: Some(ChartVariant::Line) },
    ComponentTemplate { name: "Pie Chart", kind: ComponentKind::Chart, chart_variant: Some(ChartVariant::Pie) },
    ComponentTemplate { name: "Area Chart", kind: ComponentKind::Chart, chart_variant: Some(ChartVariant::Area) },
    ComponentTemplate { name: "Data Table", kind: ComponentKind::Table, chart_variant: None },
    ComponentTemplate { name: "Metric Card", kind: ComponentKind::Metric, chart_variant: None },
    ComponentTemplate { name: "Filter Panel", kind: ComponentKind::Filter, chart_variant: None },
];

/// Look up a palette template by index.
///
/// # Errors
///
/// Returns [`LayoutError::TemplateOutOfRange`] if `index` is past the end of
/// the palette.
pub fn template(index: usize) -> Result<&'static ComponentTemplate, LayoutError> {
    PALETTE.get(index).ok_or(LayoutError::TemplateOutOfRange { index, len: PALETTE.len() })
}
