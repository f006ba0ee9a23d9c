//! Editor controller implementation
//!
//! Every logical user action on the configuration flows through this
//! controller: add, duplicate, delete, rename, reorder, form apply, save,
//! and reload. Each action marks the dirty flag exactly once (reorders only
//! when the order actually changed), so the close-confirmation prompt fires
//! precisely when the persisted file would differ from memory.

use crate::config::{
    AppConfig, ConfigManager, GameRecord, GlobalSettings, ManagedAppRecord, MoveDirection,
    WindowState,
};
use crate::error::{LaunchDeckError, Result};
use crate::forms::{self, GameForm, ManagedAppForm};
use crate::state::EditorContext;
use crate::utils::SessionLauncher;
use std::path::PathBuf;
use tracing::{info, warn};

/// Application logic controller for the configuration editor
#[derive(Debug)]
pub struct EditorController {
    ctx: EditorContext,
}

impl EditorController {
    /// Create a controller around a loaded configuration
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            ctx: EditorContext::new(config, config_path),
        }
    }

    /// Read access to the editor context
    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    /// Read access to the configuration tree
    pub fn config(&self) -> &AppConfig {
        &self.ctx.config
    }

    /// Whether unsaved changes exist
    pub fn is_dirty(&self) -> bool {
        self.ctx.dirty.is_modified()
    }

    /// Whether closing the editor should ask for confirmation first
    pub fn needs_close_confirmation(&self) -> bool {
        self.is_dirty()
    }

    // --- selection -------------------------------------------------------

    /// Change the selected game (no dirty impact)
    pub fn select_game(&mut self, key: Option<String>) {
        self.ctx.selected_game = key;
    }

    /// Currently selected game key
    pub fn selected_game(&self) -> Option<&str> {
        self.ctx.selected_game.as_deref()
    }

    /// Change the selected managed app (no dirty impact)
    pub fn select_app(&mut self, key: Option<String>) {
        self.ctx.selected_app = key;
    }

    /// Currently selected managed-app key
    pub fn selected_app(&self) -> Option<&str> {
        self.ctx.selected_app.as_deref()
    }

    // --- games -----------------------------------------------------------

    /// Add a new game with default field values; returns its key
    pub fn add_game(&mut self) -> String {
        let key = self.ctx.config.games.fresh_key("game");
        info!("Adding game '{key}'");
        self.ctx
            .config
            .games
            .insert(key.clone(), GameRecord::default())
            .expect("fresh_key returned a taken key");
        self.ctx.selected_game = Some(key.clone());
        self.ctx.dirty.set_modified();
        key
    }

    /// Deep-copy a game under a fresh key, placed directly after its source
    pub fn duplicate_game(&mut self, key: &str) -> Result<String> {
        let source = self
            .ctx
            .config
            .games
            .get(key)
            .ok_or_else(|| LaunchDeckError::RecordNotFound(key.to_string()))?;

        let mut copy = source.clone();
        copy.display_name = format!("{} (copy)", copy.display_name);

        let new_key = self.ctx.config.games.fresh_key("game");
        info!("Duplicating game '{key}' as '{new_key}'");
        self.ctx.config.games.insert_after(key, new_key.clone(), copy)?;
        self.ctx.selected_game = Some(new_key.clone());
        self.ctx.dirty.set_modified();
        Ok(new_key)
    }

    /// Delete a game from map and order together
    pub fn delete_game(&mut self, key: &str) -> Result<()> {
        info!("Deleting game '{key}'");
        self.ctx
            .config
            .games
            .remove(key)
            .ok_or_else(|| LaunchDeckError::RecordNotFound(key.to_string()))?;
        if self.ctx.selected_game.as_deref() == Some(key) {
            self.ctx.selected_game = None;
        }
        self.ctx.dirty.set_modified();
        Ok(())
    }

    /// Rename a game key. Collisions are rejected before anything mutates.
    pub fn rename_game(&mut self, old_key: &str, new_key: &str) -> Result<()> {
        if old_key == new_key {
            return Ok(());
        }
        info!("Renaming game '{old_key}' to '{new_key}'");
        self.ctx.config.games.rename(old_key, new_key)?;
        if self.ctx.selected_game.as_deref() == Some(old_key) {
            self.ctx.selected_game = Some(new_key.to_string());
        }
        self.ctx.dirty.set_modified();
        Ok(())
    }

    /// Move a game one of the discrete directions
    pub fn move_game(&mut self, key: &str, direction: MoveDirection) -> bool {
        let changed = self.ctx.config.games.move_relative(key, direction);
        if changed {
            self.ctx.dirty.set_modified();
        }
        changed
    }

    /// Move a game from one list position to another (drag handle path)
    pub fn move_game_to(&mut self, source_index: usize, target_index: usize) -> bool {
        let changed = self.ctx.config.games.move_to_position(source_index, target_index);
        if changed {
            self.ctx.dirty.set_modified();
        }
        changed
    }

    /// Drop a dragged game row next to a target row
    pub fn drop_game(&mut self, dragged: &str, target: Option<&str>, insert_above: bool) -> bool {
        let changed = self.ctx.config.games.drop_at(dragged, target, insert_above);
        if changed {
            self.ctx.dirty.set_modified();
        }
        changed
    }

    /// Read the game form back into its record
    pub fn apply_game_form(&mut self, key: &str, form: &GameForm) -> Result<()> {
        let record = self
            .ctx
            .config
            .games
            .get_mut(key)
            .ok_or_else(|| LaunchDeckError::RecordNotFound(key.to_string()))?;
        let updated = forms::game_from_form(form);
        if *record != updated {
            *record = updated;
            self.ctx.dirty.set_modified();
        }
        Ok(())
    }

    // --- managed apps ----------------------------------------------------

    /// Add a new managed app with default field values; returns its key
    pub fn add_managed_app(&mut self) -> String {
        let key = self.ctx.config.managed_apps.fresh_key("app");
        info!("Adding managed app '{key}'");
        self.ctx
            .config
            .managed_apps
            .insert(key.clone(), ManagedAppRecord::default())
            .expect("fresh_key returned a taken key");
        self.ctx.selected_app = Some(key.clone());
        self.ctx.dirty.set_modified();
        key
    }

    /// Deep-copy a managed app under a fresh key, placed after its source
    pub fn duplicate_managed_app(&mut self, key: &str) -> Result<String> {
        let source = self
            .ctx
            .config
            .managed_apps
            .get(key)
            .ok_or_else(|| LaunchDeckError::RecordNotFound(key.to_string()))?;

        let mut copy = source.clone();
        copy.display_name = format!("{} (copy)", copy.display_name);

        let new_key = self.ctx.config.managed_apps.fresh_key("app");
        info!("Duplicating managed app '{key}' as '{new_key}'");
        self.ctx
            .config
            .managed_apps
            .insert_after(key, new_key.clone(), copy)?;
        self.ctx.selected_app = Some(new_key.clone());
        self.ctx.dirty.set_modified();
        Ok(new_key)
    }

    /// Delete a managed app and strip its back-references from all games
    pub fn delete_managed_app(&mut self, key: &str) -> Result<()> {
        info!("Deleting managed app '{key}'");
        self.ctx
            .config
            .managed_apps
            .remove(key)
            .ok_or_else(|| LaunchDeckError::RecordNotFound(key.to_string()))?;

        for game_key in self.game_keys() {
            if let Some(game) = self.ctx.config.games.get_mut(&game_key) {
                game.managed_apps.retain(|app_key| app_key != key);
            }
        }

        if self.ctx.selected_app.as_deref() == Some(key) {
            self.ctx.selected_app = None;
        }
        self.ctx.dirty.set_modified();
        Ok(())
    }

    /// Rename a managed-app key across the map, the order, and every game
    /// back-reference.
    ///
    /// All updates are computed up front and applied only after validation
    /// succeeds, so a rejected rename never leaves a half-updated tree.
    pub fn rename_managed_app(&mut self, old_key: &str, new_key: &str) -> Result<()> {
        if old_key == new_key {
            return Ok(());
        }
        if !self.ctx.config.managed_apps.contains_key(old_key) {
            return Err(LaunchDeckError::RecordNotFound(old_key.to_string()));
        }
        if self.ctx.config.managed_apps.contains_key(new_key) {
            warn!("Rejecting managed-app rename '{old_key}' -> '{new_key}': key taken");
            return Err(LaunchDeckError::DuplicateKey(new_key.to_string()));
        }

        // Gather affected games first; nothing below this point can fail.
        let affected: Vec<String> = self
            .ctx
            .config
            .games
            .iter_ordered()
            .filter(|(_, game)| game.managed_apps.iter().any(|k| k == old_key))
            .map(|(game_key, _)| game_key.to_string())
            .collect();

        info!(
            "Renaming managed app '{old_key}' to '{new_key}' ({} back-reference(s))",
            affected.len()
        );

        self.ctx
            .config
            .managed_apps
            .rename(old_key, new_key)
            .expect("rename validated above");
        for game_key in affected {
            if let Some(game) = self.ctx.config.games.get_mut(&game_key) {
                for app_key in &mut game.managed_apps {
                    if app_key == old_key {
                        *app_key = new_key.to_string();
                    }
                }
            }
        }

        if self.ctx.selected_app.as_deref() == Some(old_key) {
            self.ctx.selected_app = Some(new_key.to_string());
        }
        self.ctx.dirty.set_modified();
        Ok(())
    }

    /// Move a managed app one of the discrete directions
    pub fn move_managed_app(&mut self, key: &str, direction: MoveDirection) -> bool {
        let changed = self.ctx.config.managed_apps.move_relative(key, direction);
        if changed {
            self.ctx.dirty.set_modified();
        }
        changed
    }

    /// Move a managed app from one list position to another
    pub fn move_managed_app_to(&mut self, source_index: usize, target_index: usize) -> bool {
        let changed = self
            .ctx
            .config
            .managed_apps
            .move_to_position(source_index, target_index);
        if changed {
            self.ctx.dirty.set_modified();
        }
        changed
    }

    /// Drop a dragged managed-app row next to a target row
    pub fn drop_managed_app(
        &mut self,
        dragged: &str,
        target: Option<&str>,
        insert_above: bool,
    ) -> bool {
        let changed = self
            .ctx
            .config
            .managed_apps
            .drop_at(dragged, target, insert_above);
        if changed {
            self.ctx.dirty.set_modified();
        }
        changed
    }

    /// Read the managed-app form back into its record
    pub fn apply_app_form(&mut self, key: &str, form: &ManagedAppForm) -> Result<()> {
        let record = self
            .ctx
            .config
            .managed_apps
            .get_mut(key)
            .ok_or_else(|| LaunchDeckError::RecordNotFound(key.to_string()))?;
        let updated = forms::app_from_form(form);
        if *record != updated {
            *record = updated;
            self.ctx.dirty.set_modified();
        }
        Ok(())
    }

    // --- settings --------------------------------------------------------

    /// Replace the global settings
    pub fn update_settings(&mut self, settings: GlobalSettings) {
        if self.ctx.config.settings != settings {
            self.ctx.config.settings = settings;
            self.ctx.dirty.set_modified();
        }
    }

    /// Record the window geometry for the next save.
    ///
    /// Window moves alone do not count as unsaved work, so this does not
    /// raise the dirty flag or trigger the close prompt.
    pub fn update_window_state(&mut self, window_state: WindowState) {
        self.ctx.config.settings.window_state = window_state;
    }

    /// Note the result of an update check for rate limiting on later runs
    pub fn record_update_check(&mut self, timestamp: u64, latest_version: &str) {
        self.ctx.config.settings.last_update_check_time = timestamp;
        self.ctx.config.settings.cached_latest_version = latest_version.to_string();
    }

    // --- persistence -----------------------------------------------------

    /// Save the configuration to its path.
    ///
    /// The dirty flag is cleared only on success; on failure both the
    /// in-memory state and the flag are untouched so the user can retry.
    pub fn save(&mut self) -> Result<()> {
        ConfigManager::save_to(&self.ctx.config_path, &self.ctx.config)?;
        self.ctx.dirty.clear_modified();
        Ok(())
    }

    /// Discard in-memory changes and reload from disk
    pub fn reload(&mut self) -> Result<()> {
        let config = ConfigManager::load_from(&self.ctx.config_path)?;
        info!("Configuration reloaded, discarding in-memory changes");
        self.ctx.config = config;
        self.ctx.selected_game = None;
        self.ctx.selected_app = None;
        self.ctx.dirty.clear_modified();
        Ok(())
    }

    // --- session launch --------------------------------------------------

    /// Hand a game session off to the launcher (no dirty impact)
    pub fn launch_game(&self, key: &str) -> Result<()> {
        let game = self
            .ctx
            .config
            .games
            .get(key)
            .ok_or_else(|| LaunchDeckError::RecordNotFound(key.to_string()))?;
        SessionLauncher::new(&self.ctx.config.settings).launch(key, game)
    }

    fn game_keys(&self) -> Vec<String> {
        self.ctx
            .config
            .games
            .order()
            .iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StopAction;
    use std::path::PathBuf;

    fn controller() -> EditorController {
        EditorController::new(AppConfig::default(), PathBuf::from("unused.json"))
    }

    fn controller_with_apps() -> EditorController {
        let mut c = controller();
        let obs = c.add_managed_app();
        c.rename_managed_app(&obs, "obs").unwrap();
        let discord = c.add_managed_app();
        c.rename_managed_app(&discord, "discord").unwrap();

        let game = c.add_game();
        c.rename_game(&game, "game1").unwrap();
        let mut form = forms::game_to_form(c.config().games.get("game1").unwrap());
        form.linked_apps = vec!["obs".to_string(), "discord".to_string()];
        c.apply_game_form("game1", &form).unwrap();

        c.context().dirty.clear_modified();
        c
    }

    #[test]
    fn test_add_game_selects_and_dirties() {
        let mut c = controller();
        let key = c.add_game();
        assert_eq!(key, "game1");
        assert_eq!(c.selected_game(), Some("game1"));
        assert!(c.is_dirty());
        assert!(c.config().games.contains_key("game1"));
    }

    #[test]
    fn test_duplicate_game_lands_after_source() {
        let mut c = controller();
        let first = c.add_game();
        let second = c.add_game();
        assert_eq!(c.config().games.order(), [first.clone(), second.clone()]);

        let copy = c.duplicate_game(&first).unwrap();
        assert_eq!(c.config().games.order(), [first, copy.clone(), second]);
        let record = c.config().games.get(&copy).unwrap();
        assert!(record.display_name.ends_with("(copy)"));
    }

    #[test]
    fn test_duplicate_missing_game_fails() {
        let mut c = controller();
        assert!(matches!(
            c.duplicate_game("nope"),
            Err(LaunchDeckError::RecordNotFound(_))
        ));
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_delete_game_clears_selection() {
        let mut c = controller();
        let key = c.add_game();
        c.delete_game(&key).unwrap();
        assert!(c.selected_game().is_none());
        assert!(c.config().games.is_empty());
        assert!(c.config().games.order().is_empty());
    }

    #[test]
    fn test_rename_game_collision_rejected() {
        let mut c = controller();
        let a = c.add_game();
        let b = c.add_game();
        let err = c.rename_game(&a, &b).unwrap_err();
        assert!(matches!(err, LaunchDeckError::DuplicateKey(_)));
        assert!(c.config().games.contains_key(&a));
    }

    #[test]
    fn test_move_game_sets_dirty_only_on_change() {
        let mut c = controller();
        let a = c.add_game();
        let _b = c.add_game();
        c.context().dirty.clear_modified();

        // Already at the top: no-op, stays clean.
        assert!(!c.move_game(&a, MoveDirection::Top));
        assert!(!c.is_dirty());

        assert!(c.move_game(&a, MoveDirection::Down));
        assert!(c.is_dirty());
        assert_eq!(c.config().games.order()[1], a);
    }

    #[test]
    fn test_drop_game_reorders_and_dirties() {
        let mut c = controller();
        let a = c.add_game();
        let _b = c.add_game();
        let d = c.add_game();
        c.context().dirty.clear_modified();

        assert!(c.drop_game(&d, Some(&a), true));
        assert!(c.is_dirty());
        assert_eq!(c.config().games.order()[0], d);
    }

    #[test]
    fn test_apply_identical_form_stays_clean() {
        let mut c = controller();
        let key = c.add_game();
        c.context().dirty.clear_modified();

        let form = forms::game_to_form(c.config().games.get(&key).unwrap());
        c.apply_game_form(&key, &form).unwrap();
        assert!(!c.is_dirty());

        let mut edited = form;
        edited.display_name = "Renamed".to_string();
        c.apply_game_form(&key, &edited).unwrap();
        assert!(c.is_dirty());
    }

    #[test]
    fn test_delete_managed_app_strips_back_references() {
        let mut c = controller_with_apps();
        c.delete_managed_app("obs").unwrap();

        let game = c.config().games.get("game1").unwrap();
        assert_eq!(game.managed_apps, ["discord"]);
        assert!(c.is_dirty());
    }

    #[test]
    fn test_rename_managed_app_updates_back_references_atomically() {
        let mut c = controller_with_apps();
        c.rename_managed_app("obs", "obs-studio").unwrap();

        assert!(c.config().managed_apps.contains_key("obs-studio"));
        assert!(!c.config().managed_apps.contains_key("obs"));
        // Order position preserved.
        assert_eq!(c.config().managed_apps.order()[0], "obs-studio");

        let game = c.config().games.get("game1").unwrap();
        assert_eq!(game.managed_apps, ["obs-studio", "discord"]);
    }

    #[test]
    fn test_rename_managed_app_collision_leaves_everything_untouched() {
        let mut c = controller_with_apps();
        let err = c.rename_managed_app("obs", "discord").unwrap_err();
        assert!(matches!(err, LaunchDeckError::DuplicateKey(_)));

        // No partial application anywhere.
        assert!(c.config().managed_apps.contains_key("obs"));
        let game = c.config().games.get("game1").unwrap();
        assert_eq!(game.managed_apps, ["obs", "discord"]);
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_apply_app_form_coerces_timeout() {
        let mut c = controller_with_apps();
        let mut form = forms::app_to_form(c.config().managed_apps.get("obs").unwrap());
        form.stop_timeout = "not a number".to_string();
        form.stop_action = StopAction::Stop;
        c.apply_app_form("obs", &form).unwrap();

        let record = c.config().managed_apps.get("obs").unwrap();
        assert_eq!(
            record.stop_timeout_secs,
            crate::config::models::DEFAULT_STOP_TIMEOUT_SECS
        );
    }

    #[test]
    fn test_save_clears_dirty_and_failure_keeps_it() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut c = EditorController::new(AppConfig::default(), path);

        c.add_game();
        assert!(c.is_dirty());
        c.save().unwrap();
        assert!(!c.is_dirty());

        // A save that cannot create its temp file keeps the flag raised.
        let mut broken = EditorController::new(
            AppConfig::default(),
            temp_dir.path().join("missing-dir").join("config.json"),
        );
        broken.add_game();
        assert!(broken.save().is_err());
        assert!(broken.is_dirty());
    }

    #[test]
    fn test_reload_discards_changes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut c = EditorController::new(AppConfig::default(), path);
        c.add_game();
        c.save().unwrap();

        c.add_game();
        assert_eq!(c.config().games.len(), 2);
        c.reload().unwrap();
        assert_eq!(c.config().games.len(), 1);
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_move_game_to_position() {
        let mut c = controller();
        let a = c.add_game();
        let b = c.add_game();
        let d = c.add_game();
        c.context().dirty.clear_modified();

        assert!(c.move_game_to(0, 2));
        assert_eq!(c.config().games.order(), [b, d, a]);
        assert!(c.is_dirty());

        // Out-of-range source is a no-op.
        assert!(!c.move_game_to(9, 0));
    }

    #[test]
    fn test_drop_managed_app_between_rows() {
        let mut c = controller_with_apps();
        assert!(c.drop_managed_app("discord", Some("obs"), true));
        assert_eq!(c.config().managed_apps.order(), ["discord", "obs"]);
        assert!(c.is_dirty());

        assert!(c.move_managed_app_to(0, 1));
        assert_eq!(c.config().managed_apps.order(), ["obs", "discord"]);
    }

    #[test]
    fn test_update_settings_dirties_only_on_change() {
        let mut c = controller();
        let settings = c.config().settings.clone();
        c.update_settings(settings.clone());
        assert!(!c.is_dirty());

        let mut changed = settings;
        changed.launcher_path = Some(PathBuf::from("C:\\Tools\\launcher.exe"));
        c.update_settings(changed);
        assert!(c.is_dirty());
    }

    #[test]
    fn test_launch_unknown_game_is_rejected() {
        let c = controller();
        assert!(matches!(
            c.launch_game("nope"),
            Err(LaunchDeckError::RecordNotFound(_))
        ));
    }

    #[test]
    fn test_window_state_update_does_not_dirty() {
        let mut c = controller();
        c.update_window_state(WindowState {
            x: 5,
            y: 6,
            width: 700,
            height: 500,
        });
        assert!(!c.is_dirty());
        assert_eq!(c.config().settings.window_state.x, 5);
    }
}
