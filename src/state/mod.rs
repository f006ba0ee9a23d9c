//! Editor state module
//!
//! Holds the dirty-state tracker and the explicit application context that
//! replaces ambient globals.

pub mod context;
pub mod dirty;

pub use context::EditorContext;
pub use dirty::DirtyTracker;
