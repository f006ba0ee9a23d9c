//! Configuration manager for loading and saving the configuration document
//!
//! The configuration lives in `%APPDATA%\LaunchDeck\config.json`. Loads run
//! the legacy-alias migration before typed deserialization; a missing file
//! falls back to the bundled sample configuration, while a malformed file is
//! a hard error (there is no sensible in-memory default for a whole
//! configuration). Saves use a fixed 4-space pretty formatter for stable,
//! diff-friendly output and write atomically via a temp file and rename.

use crate::config::migrate;
use crate::config::models::AppConfig;
use crate::error::{LaunchDeckError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bundled sample configuration used when no config file exists yet
const SAMPLE_CONFIG: &str = include_str!("../../assets/sample_config.json");

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the path to the configuration file
    ///
    /// Returns: `%APPDATA%\LaunchDeck\config.json`
    pub fn config_path() -> PathBuf {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("LaunchDeck").join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_path = Self::config_path();
        let config_dir = config_path.parent().ok_or_else(|| {
            LaunchDeckError::ConfigError(crate::error::StringError::new("Invalid config path"))
        })?;

        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    }

    /// Load the configuration from the default location
    pub fn load() -> Result<AppConfig> {
        Self::load_from(&Self::config_path())
    }

    /// Load the configuration from an explicit path.
    ///
    /// A missing file yields the bundled sample configuration; a file that
    /// exists but cannot be parsed is an error the caller must surface.
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            info!("Configuration file not found, starting from the bundled sample");
            return Self::parse(SAMPLE_CONFIG);
        }

        let json = std::fs::read_to_string(path)?;
        let config = Self::parse(&json)?;
        info!(
            "Configuration loaded: {} game(s), {} managed app(s)",
            config.games.len(),
            config.managed_apps.len()
        );
        Ok(config)
    }

    /// Parse a configuration document, applying the legacy migration first
    pub fn parse(json: &str) -> Result<AppConfig> {
        let mut document: serde_json::Value = serde_json::from_str(json)?;
        migrate::migrate(&mut document);
        let config = serde_json::from_value(document)?;
        Ok(config)
    }

    /// Save the configuration to the default location
    pub fn save(config: &AppConfig) -> Result<()> {
        Self::ensure_config_dir()?;
        Self::save_to(&Self::config_path(), config)
    }

    /// Save the configuration to an explicit path with an atomic write.
    ///
    /// On any failure the target file is left as it was so the caller can
    /// keep its in-memory state and retry.
    pub fn save_to(path: &Path, config: &AppConfig) -> Result<()> {
        let config_dir = path.parent().ok_or_else(|| {
            LaunchDeckError::ConfigError(crate::error::StringError::new("Invalid config path"))
        })?;

        let json = Self::to_json_pretty(config)?;

        // Atomic write: serialize into a temp file in the same directory,
        // then rename over the target.
        let mut temp = tempfile::NamedTempFile::new_in(config_dir)?;
        std::io::Write::write_all(&mut temp, json.as_bytes())?;
        temp.persist(path).map_err(|e| {
            warn!("Failed to persist configuration temp file: {e}");
            LaunchDeckError::IoError(e.error)
        })?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Serialize with 4-space indentation and a trailing newline.
    ///
    /// The fixed formatter keeps nested indentation consistent across saves
    /// so two saves of the same state are byte-for-byte identical and diffs
    /// stay readable.
    pub fn to_json_pretty(config: &AppConfig) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        config.serialize(&mut serializer)?;
        buf.push(b'\n');
        String::from_utf8(buf)
            .map_err(|e| LaunchDeckError::ConfigError(crate::error::StringError::new(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::GameRecord;

    #[test]
    fn test_config_path() {
        let path = ConfigManager::config_path();
        assert!(path.to_string_lossy().contains("LaunchDeck"));
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_missing_file_falls_back_to_sample() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::load_from(&temp_dir.path().join("nope.json")).unwrap();
        // The bundled sample ships with at least one example of each record type.
        assert!(!config.games.is_empty());
        assert!(!config.managed_apps.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ConfigManager::load_from(&path).unwrap_err();
        assert!(matches!(err, LaunchDeckError::JsonError(_)));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = AppConfig::default();
        config
            .games
            .insert(
                "game1".to_string(),
                GameRecord {
                    display_name: "Elden Ring".to_string(),
                    ..GameRecord::default()
                },
            )
            .unwrap();

        ConfigManager::save_to(&path, &config).unwrap();
        let loaded = ConfigManager::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_pretty_output_is_stable_and_four_space_indented() {
        let mut config = AppConfig::default();
        config
            .games
            .insert("game1".to_string(), GameRecord::default())
            .unwrap();

        let first = ConfigManager::to_json_pretty(&config).unwrap();
        let second = ConfigManager::to_json_pretty(&config).unwrap();
        assert_eq!(first, second, "two saves of the same state must be identical");

        assert!(first.contains("\n    \"games\""));
        // Nested records indent one level deeper.
        assert!(first.contains("\n        \"#order\""));
        assert!(first.ends_with('\n'));
        assert!(!first.contains('\t'));
    }

    #[test]
    fn test_parse_runs_legacy_migration() {
        let json = r#"{
            "games": { "game1": { "display_name": "Doom", "path": "doom.exe" } }
        }"#;
        let config = ConfigManager::parse(json).unwrap();
        let game = config.games.get("game1").unwrap();
        assert_eq!(game.exe_path.to_string_lossy(), "doom.exe");
        assert_eq!(config.version, crate::config::migrate::CONFIG_VERSION);
    }

    #[test]
    fn test_bundled_sample_parses() {
        let config = ConfigManager::parse(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.version, crate::config::migrate::CONFIG_VERSION);
        // Every back-reference in the sample must point at a real managed app.
        for (_, game) in config.games.iter_ordered() {
            for app_key in &game.managed_apps {
                assert!(config.managed_apps.contains_key(app_key));
            }
        }
    }
}
