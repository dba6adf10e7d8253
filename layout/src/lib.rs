//! Report layout model for the device-tracking dashboard's report builder.
//!
//! This crate owns everything between a drag gesture and a stored report:
//! the fixed palette and catalogs a user picks from, the ordered canvas of
//! report components being edited, selection and preview state, drop-event
//! reconciliation, and the snapshot/export documents written through an
//! injected [`repository::Repository`]. Rendering is left to the host UI,
//! which feeds drop events in and reads [`editor::Action`]s back out.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Editing session: canvas, selection, preview gate, saves |
//! | [`canvas`] | Ordered component sequence and its list operations |
//! | [`component`] | Report component records and sparse updates |
//! | [`palette`] | Fixed templates dragged onto the canvas |
//! | [`catalog`] | Static data-source and chart-type catalogs |
//! | [`dnd`] | Drop events, drag tracking, and the drop-handler seam |
//! | [`document`] | Persisted and export document shapes |
//! | [`repository`] | Storage capability plus in-memory and file backends |
//! | [`store`] | Operations on the persisted report collection |
//! | [`ids`] | Injectable id and clock sources |
//! | [`error`] | Layout errors and stable error codes |
//! | [`consts`] | Shared string constants |

pub mod canvas;
pub mod catalog;
pub mod component;
pub mod consts;
pub mod dnd;
pub mod document;
pub mod editor;
pub mod error;
pub mod ids;
pub mod palette;
pub mod repository;
pub mod store;
