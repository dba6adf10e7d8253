//! Drag-and-drop model: drop zones, drop events, and the handler seam.
//!
//! A host drag library reports one atomic drop per gesture carrying the
//! final source and destination. `DragTracker` holds the gesture between
//! pick-up and release for hosts that report the two separately, and
//! `apply_drop` routes a finished `DropEvent` to a `DropHandler`. Nothing
//! in the data model observes intermediate drag positions.

#[cfg(test)]
#[path = "dnd_test.rs"]
mod dnd_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::Action;
use crate::error::LayoutError;

/// A list that can be dragged from or dropped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    /// The fixed template list. Drag source only.
    Palette,
    /// The live component list.
    Canvas,
}

/// A position within a drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub zone: DropZone,
    pub index: usize,
}

impl DragLocation {
    #[must_use]
    pub fn palette(index: usize) -> Self {
        Self { zone: DropZone::Palette, index }
    }

    #[must_use]
    pub fn canvas(index: usize) -> Self {
        Self { zone: DropZone::Canvas, index }
    }
}

/// A completed drag gesture.
///
/// `destination` is `None` when the item was released outside every drop
/// target; such a drop leaves all state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEvent {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

/// Capability a drag-and-drop adapter drives.
///
/// Any concrete drag library can sit in front of this trait without the
/// data model knowing which one it is.
pub trait DropHandler {
    /// Move an item between (or within) drop zones.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when either index is out of range.
    fn on_reorder(
        &mut self,
        source_index: usize,
        dest_index: usize,
        origin: DropZone,
        target: DropZone,
    ) -> Result<Action, LayoutError>;

    /// Instantiate palette template `template_index` at canvas `dest_index`.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when the template or destination is out of range.
    fn on_insert_from_palette(&mut self, template_index: usize, dest_index: usize) -> Result<Action, LayoutError>;
}

/// Route a finished drop to the matching handler operation.
///
/// Palette → canvas inserts, canvas → canvas reorders, and every other
/// combination (including a drop outside any zone) is a no-op.
///
/// # Errors
///
/// Propagates the handler's [`LayoutError`].
pub fn apply_drop<H: DropHandler + ?Sized>(handler: &mut H, event: &DropEvent) -> Result<Action, LayoutError> {
    let Some(dest) = event.destination else {
        debug!(source = ?event.source, "drop outside any target; ignoring");
        return Ok(Action::None);
    };
    match (event.source.zone, dest.zone) {
        (DropZone::Palette, DropZone::Canvas) => handler.on_insert_from_palette(event.source.index, dest.index),
        (origin @ DropZone::Canvas, target @ DropZone::Canvas) => {
            handler.on_reorder(event.source.index, dest.index, origin, target)
        }
        (_, DropZone::Palette) => Ok(Action::None),
    }
}

/// Gesture state between pick-up and release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// An item has been picked up.
    Dragging {
        /// Where the item was picked up from.
        source: DragLocation,
    },
}

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up an item. Replaces any gesture already in progress.
    pub fn begin(&mut self, source: DragLocation) {
        self.state = DragState::Dragging { source };
    }

    /// Release the item, returning the completed drop if a drag was active.
    pub fn end(&mut self, destination: Option<DragLocation>) -> Option<DropEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { source } => Some(DropEvent { source, destination }),
        }
    }

    /// Abandon the gesture without producing a drop.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
