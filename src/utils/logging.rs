//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to
//! `%APPDATA%\LaunchDeck\editor.log` and rotation on application startup
//! keeping the last 10 sessions.

use crate::error::Result;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (editor.log.1 through .9)
const MAX_LOG_FILES: u8 = 9;

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via the `RUST_LOG`
/// environment variable. Existing logs are rotated on startup so each
/// session gets a fresh file.
pub fn init_logging() -> Result<()> {
    let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
    let log_dir = PathBuf::from(appdata).join("LaunchDeck");
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("editor.log");
    rotate_logs_on_startup(&log_path)?;

    // tracing_appender's rotation policies are time based, not
    // session based, so rotation stays manual and the appender never
    // rotates on its own.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("editor")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| crate::error::LaunchDeckError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| crate::error::LaunchDeckError::ConfigError(Box::new(e)))?;

    tracing::info!("LaunchDeck v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on application startup
///
/// Keeps a history of the last 10 sessions: the oldest file is deleted,
/// every numbered file shifts up by one, and the current log becomes `.1`.
/// Called unconditionally on every startup regardless of file size.
fn rotate_logs_on_startup(log_path: &PathBuf) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path.parent().ok_or_else(|| {
        crate::error::LaunchDeckError::ConfigError(crate::error::StringError::new(
            "Invalid log path",
        ))
    })?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| {
            crate::error::LaunchDeckError::ConfigError(crate::error::StringError::new(
                "Invalid log filename",
            ))
        })?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    let log_1 = log_dir.join(format!("{log_name}.1"));
    std::fs::rename(log_path, &log_1)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_log(path: &PathBuf, content: &str) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_rotate_logs_on_startup_basic() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("editor.log");

        create_test_log(&log_path, "Session 1 log content");
        rotate_logs_on_startup(&log_path).unwrap();

        let log_1 = temp_dir.path().join("editor.log.1");
        assert!(log_1.exists(), "editor.log.1 should exist after rotation");
        assert!(
            !log_path.exists(),
            "editor.log is created fresh by the logger after rotation"
        );
        assert_eq!(fs::read_to_string(&log_1).unwrap(), "Session 1 log content");
    }

    #[test]
    fn test_rotate_logs_on_startup_multiple_rotations() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("editor.log");

        for i in 1..=5 {
            create_test_log(&log_path, &format!("Session {i} log content"));
            rotate_logs_on_startup(&log_path).unwrap();
        }

        // Most recent session is in .1, oldest in .5.
        for i in 1..=5 {
            let log_i = temp_dir.path().join(format!("editor.log.{i}"));
            let expected_session = 6 - i;
            assert_eq!(
                fs::read_to_string(&log_i).unwrap(),
                format!("Session {expected_session} log content"),
            );
        }
    }

    #[test]
    fn test_rotate_logs_on_startup_respects_max_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("editor.log");

        for i in 1..=12 {
            create_test_log(&log_path, &format!("Session {i} log content"));
            rotate_logs_on_startup(&log_path).unwrap();
        }

        for i in 1..=MAX_LOG_FILES {
            assert!(temp_dir.path().join(format!("editor.log.{i}")).exists());
        }
        assert!(!temp_dir.path().join("editor.log.10").exists());

        // Sessions 1-3 fell off the end; session 4 is the oldest retained.
        let oldest = temp_dir.path().join(format!("editor.log.{MAX_LOG_FILES}"));
        assert_eq!(
            fs::read_to_string(&oldest).unwrap(),
            "Session 4 log content"
        );
    }

    #[test]
    fn test_rotate_logs_on_startup_no_existing_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("editor.log");

        assert!(rotate_logs_on_startup(&log_path).is_ok());
        assert!(!log_path.exists());
        assert!(!temp_dir.path().join("editor.log.1").exists());
    }

    #[test]
    fn test_rotate_logs_on_startup_partial_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("editor.log");

        create_test_log(&log_path, "Current session");
        create_test_log(&temp_dir.path().join("editor.log.1"), "Previous session");
        create_test_log(&temp_dir.path().join("editor.log.5"), "Very old session");

        rotate_logs_on_startup(&log_path).unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("editor.log.1")).unwrap(),
            "Current session"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("editor.log.2")).unwrap(),
            "Previous session"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("editor.log.6")).unwrap(),
            "Very old session"
        );
    }
}
