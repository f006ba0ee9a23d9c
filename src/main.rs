//! `LaunchDeck` - configuration editor for game-session automation
//!
//! Edits the games and managed companion apps of the automation tool and
//! persists them as a single JSON document.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use gui::GuiController;
use launchdeck::{
    config::ConfigManager,
    controller::EditorController,
    error::get_user_friendly_error,
    utils,
};
use tracing::{error, info};

// Include Slint-generated code
slint::include_modules!();

/// Main entry point for the application
///
/// Initializes logging, loads the configuration (falling back to the
/// bundled sample when none exists), and hands control to the GUI event
/// loop.
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("LaunchDeck v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = ConfigManager::config_path();
    let config = match ConfigManager::load() {
        Ok(config) => config,
        Err(e) => {
            // A whole configuration has no sensible in-memory default;
            // a file that exists but cannot be parsed is fatal.
            error!("Failed to load configuration: {e}");
            show_error_and_exit(&get_user_friendly_error(&e));
            return Err(e.into());
        }
    };
    info!(
        "Configuration loaded with {} game(s) and {} managed app(s)",
        config.games.len(),
        config.managed_apps.len()
    );

    let editor = EditorController::new(config, config_path);

    let gui_controller =
        GuiController::new(editor).context("Failed to initialize GUI controller")?;

    info!("Starting GUI event loop");
    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    info!("LaunchDeck shutting down");

    Ok(())
}

/// Shows an error dialog and exits the application.
#[cfg(windows)]
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("LaunchDeck - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}

/// Shows an error dialog and exits the application (non-Windows fallback).
#[cfg(not(windows))]
fn show_error_and_exit(message: &str) {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
