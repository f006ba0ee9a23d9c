//! Controller module
//!
//! Hosts the editor controller that every UI event handler dispatches into.

pub mod editor_controller;

pub use editor_controller::EditorController;
