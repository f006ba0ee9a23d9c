//! Editor application context
//!
//! The context bundles the pieces of mutable editor state (configuration
//! tree, dirty flag, config path, current selections) into one struct that
//! is passed into handlers explicitly. Keeping this out of globals makes
//! the order and dirty logic testable without a live UI.

use crate::config::AppConfig;
use crate::state::DirtyTracker;
use std::path::PathBuf;

/// Mutable state shared by all editor handlers
#[derive(Debug)]
pub struct EditorContext {
    /// The in-memory configuration tree
    pub config: AppConfig,
    /// Where the configuration is persisted
    pub config_path: PathBuf,
    /// Unsaved-changes flag
    pub dirty: DirtyTracker,
    /// Key of the currently selected game, if any
    pub selected_game: Option<String>,
    /// Key of the currently selected managed app, if any
    pub selected_app: Option<String>,
}

impl EditorContext {
    /// Create a context around a freshly loaded configuration
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            dirty: DirtyTracker::new(),
            selected_game: None,
            selected_app: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_clean_with_no_selection() {
        let ctx = EditorContext::new(AppConfig::default(), PathBuf::from("config.json"));
        assert!(!ctx.dirty.is_modified());
        assert!(ctx.selected_game.is_none());
        assert!(ctx.selected_app.is_none());
    }
}
