//! Report editing session: canvas, selection, preview gate, and save/export.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `ReportEditor` backs one open report builder. The host UI feeds it
//! drop events and properties-panel edits and re-renders from the returned
//! [`Action`]s. The canvas is transient: nothing reaches a repository until
//! `save` is called, and a failed save leaves the canvas exactly as it was
//! so the user can retry.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use tracing::debug;

use crate::canvas::Canvas;
use crate::catalog::has_field;
use crate::component::{
    ComponentId, FilterCriterion, FilterId, FilterOperator, PartialFilter, PartialReportComponent, ReportComponent,
};
use crate::dnd::{DropHandler, DropZone};
use crate::document::{ExportDocument, ReportDocument};
use crate::error::LayoutError;
use crate::ids::{Clock, IdSource, RandomIds};
use crate::palette;
use crate::repository::Repository;
use crate::store::{ReportError, ReportStore};

/// Result of an editor operation, for the host to re-render from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed.
    None,
    ComponentInserted { id: ComponentId, index: usize },
    ComponentMoved { id: ComponentId, from: usize, to: usize },
    ComponentRemoved { id: ComponentId },
    ComponentUpdated { id: ComponentId },
    FilterAdded { component_id: ComponentId, filter_id: FilterId },
    FilterUpdated { component_id: ComponentId, filter_id: FilterId },
    FilterRemoved { component_id: ComponentId, filter_id: FilterId },
    SelectionChanged(Option<ComponentId>),
    /// The whole canvas was cleared or replaced.
    CanvasReset,
}

/// The editing session behind one report builder.
pub struct ReportEditor {
    canvas: Canvas,
    selected_id: Option<ComponentId>,
    preview_mode: bool,
    ids: Box<dyn IdSource>,
}

impl Default for ReportEditor {
    fn default() -> Self {
        Self::with_ids(Box::new(RandomIds))
    }
}

impl ReportEditor {
    /// Empty editor drawing component ids from random UUIDs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty editor drawing component ids from `ids`.
    #[must_use]
    pub fn with_ids(ids: Box<dyn IdSource>) -> Self {
        Self { canvas: Canvas::new(), selected_id: None, preview_mode: false, ids }
    }

    // --- Canvas mutations ---

    /// Instantiate palette template `template_index` at canvas `dest_index`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TemplateOutOfRange`] or
    /// [`LayoutError::IndexOutOfRange`]; the canvas is unchanged on error.
    pub fn insert_from_palette(&mut self, template_index: usize, dest_index: usize) -> Result<Action, LayoutError> {
        if self.preview_mode {
            return Ok(Action::None);
        }
        let template = palette::template(template_index)?;
        if dest_index > self.canvas.len() {
            return Err(LayoutError::IndexOutOfRange { index: dest_index, len: self.canvas.len() });
        }
        let component = template.instantiate(self.ids.next_id());
        let id = component.id;
        self.canvas.insert(dest_index, component)?;
        debug!(%id, template = template.name, index = dest_index, "component inserted");
        Ok(Action::ComponentInserted { id, index: dest_index })
    }

    /// Move the component at `source` to `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if either index is off the canvas.
    pub fn reorder(&mut self, source: usize, dest: usize) -> Result<Action, LayoutError> {
        if self.preview_mode {
            return Ok(Action::None);
        }
        if !self.canvas.reorder(source, dest)? {
            return Ok(Action::None);
        }
        let Some(moved) = self.canvas.components().get(dest) else {
            return Ok(Action::None);
        };
        debug!(id = %moved.id, from = source, to = dest, "component moved");
        Ok(Action::ComponentMoved { id: moved.id, from: source, to: dest })
    }

    /// Remove a component. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &ComponentId) -> Action {
        if self.preview_mode || self.canvas.remove(id).is_none() {
            return Action::None;
        }
        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
        debug!(%id, "component removed");
        Action::ComponentRemoved { id: *id }
    }

    /// Merge a sparse update into one component. Unknown ids are a no-op.
    pub fn update(&mut self, id: &ComponentId, partial: &PartialReportComponent) -> Action {
        if self.preview_mode || partial.is_empty() {
            return Action::None;
        }
        let Some(component) = self.canvas.get_mut(id) else {
            return Action::None;
        };
        if !component.apply_partial(partial) {
            return Action::None;
        }
        debug!(%id, "component updated");
        Action::ComponentUpdated { id: *id }
    }

    /// Empty the canvas and drop the selection.
    pub fn clear(&mut self) -> Action {
        if self.preview_mode {
            return Action::None;
        }
        self.canvas.clear();
        self.selected_id = None;
        Action::CanvasReset
    }

    /// Replace the canvas with a saved report's components for re-editing.
    ///
    /// Later duplicates of a component id are dropped.
    pub fn load(&mut self, doc: &ReportDocument) -> Action {
        self.canvas = Canvas::from_components(doc.components.clone());
        self.selected_id = None;
        debug!(report = %doc.id, components = self.canvas.len(), "report loaded into editor");
        Action::CanvasReset
    }

    // --- Filters ---

    /// Append a filter criterion to a component.
    ///
    /// `field` must be listed by the component's data source; anything else
    /// is a no-op.
    pub fn add_filter(
        &mut self,
        component_id: &ComponentId,
        field: impl Into<String>,
        operator: FilterOperator,
        value: serde_json::Value,
    ) -> Action {
        if self.preview_mode {
            return Action::None;
        }
        let field = field.into();
        let Some(component) = self.canvas.get_mut(component_id) else {
            return Action::None;
        };
        if !has_field(component.data_source_id, &field) {
            debug!(
                id = %component_id,
                field = %field,
                source = ?component.data_source_id,
                "filter field not in data source"
            );
            return Action::None;
        }
        let filter_id = self.ids.next_id();
        component.push_filter(FilterCriterion { id: filter_id, field, operator, value });
        Action::FilterAdded { component_id: *component_id, filter_id }
    }

    /// Apply a sparse update to one filter. Unknown ids, and a new `field`
    /// the data source does not list, are a no-op.
    pub fn update_filter(&mut self, component_id: &ComponentId, filter_id: &FilterId, partial: &PartialFilter) -> Action {
        if self.preview_mode {
            return Action::None;
        }
        let Some(component) = self.canvas.get_mut(component_id) else {
            return Action::None;
        };
        if let Some(ref field) = partial.field {
            if !has_field(component.data_source_id, field) {
                debug!(
                    id = %component_id,
                    field = %field,
                    source = ?component.data_source_id,
                    "filter field not in data source"
                );
                return Action::None;
            }
        }
        if !component.apply_filter_partial(filter_id, partial) {
            return Action::None;
        }
        Action::FilterUpdated { component_id: *component_id, filter_id: *filter_id }
    }

    /// Remove one filter. Unknown ids are a no-op.
    pub fn remove_filter(&mut self, component_id: &ComponentId, filter_id: &FilterId) -> Action {
        if self.preview_mode {
            return Action::None;
        }
        let Some(component) = self.canvas.get_mut(component_id) else {
            return Action::None;
        };
        if component.remove_filter(filter_id).is_none() {
            return Action::None;
        }
        Action::FilterRemoved { component_id: *component_id, filter_id: *filter_id }
    }

    // --- Selection / mode ---

    /// Select a component. Ids not on the canvas are ignored.
    pub fn select(&mut self, id: &ComponentId) -> Action {
        if !self.canvas.contains(id) {
            debug!(%id, "ignoring selection of unknown component");
            return Action::None;
        }
        if self.selected_id.as_ref() == Some(id) {
            return Action::None;
        }
        self.selected_id = Some(*id);
        Action::SelectionChanged(Some(*id))
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) -> Action {
        if self.selected_id.take().is_none() {
            return Action::None;
        }
        Action::SelectionChanged(None)
    }

    /// Toggle read-only preview. While on, every canvas edit is a no-op.
    pub fn set_preview_mode(&mut self, on: bool) {
        self.preview_mode = on;
    }

    // --- Persistence ---

    /// Save the current canvas as a new report under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NameRequired`] for a blank name, or
    /// [`ReportError::Storage`] if the repository write fails. The canvas is
    /// never modified.
    pub fn save<R: Repository>(&self, store: &mut ReportStore<R>, name: &str) -> Result<ReportDocument, ReportError> {
        store.save(name, self.canvas.components())
    }

    /// Export the current canvas as a downloadable document stamped by `clock`.
    ///
    /// Export never touches a repository.
    #[must_use]
    pub fn export(&self, clock: &dyn Clock, name: &str) -> ExportDocument {
        ExportDocument::new(name, self.canvas.components(), clock.now())
    }

    // --- Queries ---

    #[must_use]
    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<ComponentId> {
        self.selected_id
    }

    /// The selected component, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&ReportComponent> {
        self.selected_id.as_ref().and_then(|id| self.canvas.get(id))
    }

    /// Look up a component by id.
    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&ReportComponent> {
        self.canvas.get(id)
    }

    /// Components in canvas order.
    #[must_use]
    pub fn components(&self) -> &[ReportComponent] {
        self.canvas.components()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.canvas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canvas.is_empty()
    }
}

impl DropHandler for ReportEditor {
    fn on_reorder(
        &mut self,
        source_index: usize,
        dest_index: usize,
        origin: DropZone,
        target: DropZone,
    ) -> Result<Action, LayoutError> {
        if origin != DropZone::Canvas || target != DropZone::Canvas {
            return Ok(Action::None);
        }
        self.reorder(source_index, dest_index)
    }

    fn on_insert_from_palette(&mut self, template_index: usize, dest_index: usize) -> Result<Action, LayoutError> {
        self.insert_from_palette(template_index, dest_index)
    }
}
