//! Unsaved-changes tracking
//!
//! Single source of truth for "has anything changed since the last save."
//! Every logical user action that mutates a record or an order calls
//! [`DirtyTracker::set_modified`] exactly once; a successful save or load
//! clears the flag. The close-confirmation prompt fires if and only if the
//! flag is set, i.e. when the persisted file would differ from memory.

use std::cell::Cell;

/// Tracks whether the in-memory configuration has unsaved changes.
///
/// All mutations happen on the UI thread, so interior mutability with a
/// [`Cell`] is sufficient; there is no second mutator context to race with.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    modified: Cell<bool>,
}

impl DirtyTracker {
    /// Create a tracker in the clean state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the configuration as modified. Idempotent.
    pub fn set_modified(&self) {
        self.modified.set(true);
    }

    /// Clear the flag after a successful save or a fresh load
    pub fn clear_modified(&self) {
        self.modified.set(false);
    }

    /// Whether unsaved changes exist
    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }
}
