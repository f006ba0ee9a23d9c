//! Error types for `LaunchDeck`
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `LaunchDeck`
#[derive(Debug, Error)]
pub enum LaunchDeckError {
    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A record key that must be unique already exists in its collection
    #[error("Duplicate record key: {0}")]
    DuplicateKey(String),

    /// A record key was not found in its collection
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Failed to hand a session off to the configured launcher
    #[error("Failed to launch session '{key}'")]
    LaunchFailed {
        /// Key of the game record being launched
        key: String,
        /// Underlying process-spawn error
        #[source]
        source: std::io::Error,
    },

    /// Update check failed (network, API, or version-parse error)
    /// Preserves the underlying error source for full error chain transparency
    #[error("Update check failed: {0}")]
    UpdateCheckError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `LaunchDeck` operations
pub type Result<T> = std::result::Result<T, LaunchDeckError>;

/// Convert an error to a user-friendly message
///
/// This function takes a `LaunchDeckError` and returns a message suitable
/// for displaying to end users in error dialogs.
///
/// The messages include troubleshooting hints to help users resolve
/// common issues.
pub fn get_user_friendly_error(error: &LaunchDeckError) -> String {
    match error {
        LaunchDeckError::ConfigError(_) => "Failed to load or save the configuration.\n\n\
             Your settings may not persist.\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\LaunchDeck"
            .to_string(),
        LaunchDeckError::DuplicateKey(key) => {
            format!(
                "The id '{key}' is already in use.\n\n\
                 Every game and companion app needs a unique id.\n\
                 Pick a different id and try again."
            )
        }
        LaunchDeckError::RecordNotFound(key) => {
            format!(
                "No entry with id '{key}' exists.\n\n\
                 The entry may have been deleted.\n\
                 Reload the configuration and try again."
            )
        }
        LaunchDeckError::LaunchFailed { key, .. } => {
            format!(
                "Could not launch the session for '{key}'.\n\n\
                 Please check that:\n\
                 - The executable path is correct\n\
                 - The launcher configured in the settings exists"
            )
        }
        LaunchDeckError::UpdateCheckError(_) => "Could not check for updates.\n\n\
             This does not affect the editor.\n\
             Check your network connection or try again later."
            .to_string(),
        LaunchDeckError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        LaunchDeckError::JsonError(e) => {
            format!(
                "The configuration file could not be read:\n\n{e}\n\n\
                 Fix the file or delete it to start from the bundled sample."
            )
        }
    }
}
