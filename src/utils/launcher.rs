//! Session launcher hand-off
//!
//! The editor never manages processes itself; starting a session is handed
//! to an external collaborator. When a launcher executable is configured in
//! the global settings the game key is forwarded to it as the only
//! argument, otherwise the game's own executable is spawned directly.
//! Either way the spawn is fire-and-forget.

use crate::config::{GameRecord, GlobalSettings};
use crate::error::{LaunchDeckError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// Hands game sessions off to the configured launcher
#[derive(Debug)]
pub struct SessionLauncher {
    launcher_path: Option<PathBuf>,
}

impl SessionLauncher {
    /// Create a launcher from the global settings
    pub fn new(settings: &GlobalSettings) -> Self {
        Self {
            launcher_path: settings.launcher_path.clone(),
        }
    }

    /// Start the session for `key`.
    ///
    /// Returns as soon as the process is spawned; the session's further
    /// lifecycle belongs to the automation tool, not the editor.
    pub fn launch(&self, key: &str, game: &GameRecord) -> Result<()> {
        let mut command = match &self.launcher_path {
            Some(launcher) => {
                info!("Forwarding session '{key}' to launcher {}", launcher.display());
                let mut command = Command::new(launcher);
                command.arg(key);
                command
            }
            None => {
                info!(
                    "Launching '{key}' directly: {}",
                    game.exe_path.display()
                );
                let mut command = Command::new(&game.exe_path);
                command.args(&game.launch_args);
                command
            }
        };

        command.spawn().map_err(|source| LaunchDeckError::LaunchFailed {
            key: key.to_string(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_reports_launch_failure() {
        let settings = GlobalSettings::default();
        let game = GameRecord {
            exe_path: PathBuf::from("/definitely/not/here.exe"),
            ..GameRecord::default()
        };

        let err = SessionLauncher::new(&settings)
            .launch("game1", &game)
            .unwrap_err();
        assert!(matches!(err, LaunchDeckError::LaunchFailed { key, .. } if key == "game1"));
    }

    #[test]
    fn test_configured_launcher_takes_precedence() {
        let settings = GlobalSettings {
            launcher_path: Some(PathBuf::from("/also/not/here")),
            ..GlobalSettings::default()
        };
        let game = GameRecord::default();

        // Both paths are bogus; the error proves which one was spawned.
        let err = SessionLauncher::new(&settings)
            .launch("game2", &game)
            .unwrap_err();
        assert!(matches!(err, LaunchDeckError::LaunchFailed { .. }));
    }
}
