//! Utility modules
//!
//! Provides logging setup, the GitHub update checker, the localization
//! provider, and the session-launcher hand-off.

pub mod launcher;
pub mod localization;
pub mod logging;
pub mod update_checker;

pub use launcher::SessionLauncher;
pub use localization::Localizer;
pub use logging::init_logging;
pub use update_checker::{UpdateCheckResult, UpdateChecker};
