//! Core library of the propsync property inspector.
//! Renders the properties of a selected UI element into an editable view model and
//! writes edits back to the source document only when the text being replaced is
//! still what the panel showed.

mod category;
mod document;
mod gui;
mod host;
mod model;
mod panel;
mod scenario;
pub mod statics;

pub use category::{DisplayCategory, classify};
pub use document::{DocumentStore, offset_of, position_of};
pub use gui::run_gui;
pub use host::{EditorHost, HostError, PropertyProvider};
pub use model::{Element, Position, Property, PropertyQuery, TextRange};
pub use panel::{
    CommitOutcome, FocusOutcome, PanelHeader, PanelRow, PropertyPanel, PropertyRow, RowStyle,
};
pub use scenario::Scenario;
