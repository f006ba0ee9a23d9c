//! GUI module
//!
//! Provides the Slint-based graphical user interface: the main window with
//! its game and companion-app tabs, and the controller that dispatches UI
//! events into the editor.

pub mod gui_controller;

pub use gui_controller::GuiController;
