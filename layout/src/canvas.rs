//! The canvas: an ordered sequence of report components.
//!
//! Position in the sequence is the only ordering signal. Every operation
//! here runs under a single `&mut` borrow, so a reader never sees an element
//! missing or duplicated mid-move.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use tracing::warn;

use crate::component::{ComponentId, ReportComponent};
use crate::error::LayoutError;

/// Ordered, id-unique collection of report components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    components: Vec<ReportComponent>,
}

impl Canvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self { components: Vec::new() }
    }

    /// Build a canvas from an ordered list, dropping later duplicates of an id.
    #[must_use]
    pub fn from_components(components: Vec<ReportComponent>) -> Self {
        let mut canvas = Self::new();
        for component in components {
            let id = component.id;
            if canvas.contains(&id) {
                warn!(%id, "dropping duplicate component id");
                continue;
            }
            canvas.components.push(component);
        }
        canvas
    }

    /// Insert a component at `index`, shifting later components right.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if `index > len`, or
    /// [`LayoutError::DuplicateId`] if the id is already on the canvas. The
    /// canvas is unchanged on error.
    pub fn insert(&mut self, index: usize, component: ReportComponent) -> Result<(), LayoutError> {
        if index > self.components.len() {
            return Err(LayoutError::IndexOutOfRange { index, len: self.components.len() });
        }
        if self.contains(&component.id) {
            return Err(LayoutError::DuplicateId(component.id));
        }
        self.components.insert(index, component);
        Ok(())
    }

    /// Move the component at `source` to `dest`. Returns `false` for a no-op move.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if either index is `>= len`.
    pub fn reorder(&mut self, source: usize, dest: usize) -> Result<bool, LayoutError> {
        let len = self.components.len();
        for index in [source, dest] {
            if index >= len {
                return Err(LayoutError::IndexOutOfRange { index, len });
            }
        }
        if source < dest {
            self.components[source..=dest].rotate_left(1);
        } else if source > dest {
            self.components[dest..=source].rotate_right(1);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    /// Remove a component by id, returning it if it was present.
    pub fn remove(&mut self, id: &ComponentId) -> Option<ReportComponent> {
        let index = self.position(id)?;
        Some(self.components.remove(index))
    }

    /// Return a reference to a component by id.
    #[must_use]
    pub fn get(&self, id: &ComponentId) -> Option<&ReportComponent> {
        self.components.iter().find(|c| c.id == *id)
    }

    /// Return a mutable reference to a component by id.
    pub fn get_mut(&mut self, id: &ComponentId) -> Option<&mut ReportComponent> {
        self.components.iter_mut().find(|c| c.id == *id)
    }

    /// Index of a component by id.
    #[must_use]
    pub fn position(&self, id: &ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.position(id).is_some()
    }

    /// Components in canvas order.
    #[must_use]
    pub fn components(&self) -> &[ReportComponent] {
        &self.components
    }

    /// Remove every component.
    pub fn clear(&mut self) {
        self.components.clear();
    }

    /// Number of components on the canvas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the canvas holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
