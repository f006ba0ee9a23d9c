//! Configuration data models
//!
//! This module defines the data structures used for the game-session
//! configuration: game records, managed companion-app records, and the
//! global editor settings.
//!
//! Tag-like fields (platform, app kind, actions) deserialize from plain
//! strings and fall back to a safe default on unknown values so a single
//! unrecognized tag never rejects a whole record.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Default number of seconds a companion app gets to shut down before the
/// termination method is applied.
pub const DEFAULT_STOP_TIMEOUT_SECS: u32 = 10;

/// Platform a game is installed through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    /// Steam library game (launched through the Steam client)
    Steam,
    /// Epic Games Store game
    Epic,
    /// GOG Galaxy game
    Gog,
    /// Plain executable, not tied to a store front
    #[default]
    Standalone,
}

impl Platform {
    /// Stable tag used in the persisted configuration
    pub fn tag(self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::Epic => "epic",
            Self::Gog => "gog",
            Self::Standalone => "standalone",
        }
    }
}

impl From<String> for Platform {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "steam" => Self::Steam,
            "epic" => Self::Epic,
            "gog" => Self::Gog,
            "standalone" => Self::Standalone,
            other => {
                warn!("Unknown platform tag '{other}', falling back to 'standalone'");
                Self::Standalone
            }
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.tag().to_string()
    }
}

/// Kind of managed companion application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppKind {
    /// OBS Studio (recording/streaming)
    Obs,
    /// Discord client
    Discord,
    /// VTube Studio avatar software
    VtubeStudio,
    /// Any other executable
    #[default]
    Executable,
}

impl AppKind {
    /// Stable tag used in the persisted configuration
    pub fn tag(self) -> &'static str {
        match self {
            Self::Obs => "obs",
            Self::Discord => "discord",
            Self::VtubeStudio => "vtube_studio",
            Self::Executable => "executable",
        }
    }
}

impl From<String> for AppKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "obs" => Self::Obs,
            "discord" => Self::Discord,
            "vtube_studio" => Self::VtubeStudio,
            "executable" => Self::Executable,
            other => {
                warn!("Unknown app kind tag '{other}', falling back to 'executable'");
                Self::Executable
            }
        }
    }
}

impl From<AppKind> for String {
    fn from(kind: AppKind) -> Self {
        kind.tag().to_string()
    }
}

/// What happens to a companion app when its game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StartAction {
    /// Start the companion app together with the game
    #[default]
    Start,
    /// Leave the companion app alone
    None,
}

impl StartAction {
    /// Stable tag used in the persisted configuration
    pub fn tag(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::None => "none",
        }
    }
}

impl From<String> for StartAction {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "start" => Self::Start,
            "none" => Self::None,
            other => {
                warn!("Unknown start action tag '{other}', falling back to 'none'");
                Self::None
            }
        }
    }
}

impl From<StartAction> for String {
    fn from(action: StartAction) -> Self {
        action.tag().to_string()
    }
}

/// What happens to a companion app when its game exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StopAction {
    /// Shut the companion app down using the configured termination method
    #[default]
    Stop,
    /// Leave the companion app running
    None,
}

impl StopAction {
    /// Stable tag used in the persisted configuration
    pub fn tag(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::None => "none",
        }
    }
}

impl From<String> for StopAction {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "stop" => Self::Stop,
            "none" => Self::None,
            other => {
                warn!("Unknown stop action tag '{other}', falling back to 'none'");
                Self::None
            }
        }
    }
}

impl From<StopAction> for String {
    fn from(action: StopAction) -> Self {
        action.tag().to_string()
    }
}

/// How a companion app is shut down when its stop action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TerminationMethod {
    /// Ask the app to close its main window and wait for the stop timeout
    #[default]
    CloseMainWindow,
    /// Terminate the process immediately
    TerminateProcess,
}

impl TerminationMethod {
    /// Stable tag used in the persisted configuration
    pub fn tag(self) -> &'static str {
        match self {
            Self::CloseMainWindow => "close_main_window",
            Self::TerminateProcess => "terminate_process",
        }
    }
}

impl From<String> for TerminationMethod {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "close_main_window" => Self::CloseMainWindow,
            "terminate_process" => Self::TerminateProcess,
            other => {
                warn!("Unknown termination method tag '{other}', falling back to 'close_main_window'");
                Self::CloseMainWindow
            }
        }
    }
}

impl From<TerminationMethod> for String {
    fn from(method: TerminationMethod) -> Self {
        method.tag().to_string()
    }
}

/// A registered game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    /// Display name shown in the UI
    pub display_name: String,
    /// Platform the game is installed through
    pub platform: Platform,
    /// Full path to the game executable
    pub exe_path: PathBuf,
    /// Process names used to detect the running game
    pub process_names: Vec<String>,
    /// Extra command-line arguments passed on launch
    pub launch_args: Vec<String>,
    /// Keys of managed apps whose lifecycle is tied to this game
    pub managed_apps: Vec<String>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            display_name: "New game".to_string(),
            platform: Platform::Standalone,
            exe_path: PathBuf::new(),
            process_names: Vec::new(),
            launch_args: Vec::new(),
            managed_apps: Vec::new(),
        }
    }
}

/// A managed companion application (OBS, Discord, VTube Studio, or any
/// other executable) whose lifecycle is tied to game start/stop events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagedAppRecord {
    /// Display name shown in the UI
    pub display_name: String,
    /// Kind of companion app
    pub kind: AppKind,
    /// Full path to the executable
    pub exe_path: PathBuf,
    /// Process name used to find the running app
    pub process_name: String,
    /// Action taken when a linked game starts
    pub start_action: StartAction,
    /// Action taken when a linked game exits
    pub stop_action: StopAction,
    /// How the app is shut down (only relevant when the stop action stops it)
    pub termination_method: TerminationMethod,
    /// Seconds to wait for a graceful shutdown before escalating
    pub stop_timeout_secs: u32,
}

impl Default for ManagedAppRecord {
    fn default() -> Self {
        Self {
            display_name: "New app".to_string(),
            kind: AppKind::Executable,
            exe_path: PathBuf::new(),
            process_name: String::new(),
            start_action: StartAction::Start,
            stop_action: StopAction::Stop,
            termination_method: TerminationMethod::CloseMainWindow,
            stop_timeout_secs: DEFAULT_STOP_TIMEOUT_SECS,
        }
    }
}

/// Global editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// UI language code (e.g. "en")
    pub language: String,
    /// Optional external launcher executable; when set, launches are
    /// forwarded to it with the game key as the only argument
    pub launcher_path: Option<PathBuf>,
    /// Whether to check GitHub for new releases on startup
    pub check_updates: bool,
    /// Unix timestamp of the last update check (rate limiting)
    pub last_update_check_time: u64,
    /// Latest version string seen by the update checker
    pub cached_latest_version: String,
    /// Window state for persistence
    pub window_state: WindowState,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            launcher_path: None,
            check_updates: true,
            last_update_check_time: 0,
            cached_latest_version: String::new(),
            window_state: WindowState::default(),
        }
    }
}

/// Window state for position and size persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    /// X position
    pub x: i32,
    /// Y position
    pub y: i32,
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 860,
            height: 620,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration schema version (see [`crate::config::migrate`])
    pub version: u32,
    /// Registered games, keyed by unique id
    pub games: super::Collection<GameRecord>,
    /// Managed companion apps, keyed by unique id
    pub managed_apps: super::Collection<ManagedAppRecord>,
    /// Global editor settings
    pub settings: GlobalSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: super::migrate::CONFIG_VERSION,
            games: super::Collection::new(),
            managed_apps: super::Collection::new(),
            settings: GlobalSettings::default(),
        }
    }
}
