//! Presentation-side models.
//!
//! Rendering and styling live with the front end; this module only derives
//! what should be shown from the queue and the engine.

pub mod panel;

pub use panel::PanelView;
