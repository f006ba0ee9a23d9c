//! Form binding layer
//!
//! One-directional sync in each direction between records and the raw
//! values held by form controls. Widgets deal in strings and enum tags;
//! records deal in typed fields. The conversion back coerces types and
//! falls back to defaults on unparseable input instead of erroring, so a
//! half-typed timeout never blocks the rest of an edit.

use crate::config::models::DEFAULT_STOP_TIMEOUT_SECS;
use crate::config::{
    AppKind, GameRecord, ManagedAppRecord, Platform, StartAction, StopAction, TerminationMethod,
};
use std::path::PathBuf;
use tracing::debug;

/// Raw widget-side values of the game form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameForm {
    /// Display-name field
    pub display_name: String,
    /// Platform selector
    pub platform: Platform,
    /// Executable-path field
    pub exe_path: String,
    /// Process names, one per line as typed into the multi-line field
    pub process_names: String,
    /// Launch arguments as a single space-separated line
    pub launch_args: String,
    /// Keys of the managed apps checked for this game
    pub linked_apps: Vec<String>,
}

/// Raw widget-side values of the managed-app form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagedAppForm {
    /// Display-name field
    pub display_name: String,
    /// App-kind selector
    pub kind: AppKind,
    /// Executable-path field
    pub exe_path: String,
    /// Process-name field
    pub process_name: String,
    /// Start-action selector
    pub start_action: StartAction,
    /// Stop-action selector
    pub stop_action: StopAction,
    /// Termination-method selector
    pub termination_method: TerminationMethod,
    /// Stop timeout as typed (free text, coerced on read-back)
    pub stop_timeout: String,
}

/// Populate the game form from a record
pub fn game_to_form(record: &GameRecord) -> GameForm {
    GameForm {
        display_name: record.display_name.clone(),
        platform: record.platform,
        exe_path: record.exe_path.to_string_lossy().into_owned(),
        process_names: record.process_names.join("\n"),
        launch_args: record.launch_args.join(" "),
        linked_apps: record.managed_apps.clone(),
    }
}

/// Read the game form back into a record
pub fn game_from_form(form: &GameForm) -> GameRecord {
    GameRecord {
        display_name: form.display_name.trim().to_string(),
        platform: form.platform,
        exe_path: PathBuf::from(form.exe_path.trim()),
        process_names: split_lines(&form.process_names),
        launch_args: form
            .launch_args
            .split_whitespace()
            .map(ToString::to_string)
            .collect(),
        managed_apps: form.linked_apps.clone(),
    }
}

/// Populate the managed-app form from a record
pub fn app_to_form(record: &ManagedAppRecord) -> ManagedAppForm {
    ManagedAppForm {
        display_name: record.display_name.clone(),
        kind: record.kind,
        exe_path: record.exe_path.to_string_lossy().into_owned(),
        process_name: record.process_name.clone(),
        start_action: record.start_action,
        stop_action: record.stop_action,
        termination_method: record.termination_method,
        stop_timeout: record.stop_timeout_secs.to_string(),
    }
}

/// Read the managed-app form back into a record
pub fn app_from_form(form: &ManagedAppForm) -> ManagedAppRecord {
    ManagedAppRecord {
        display_name: form.display_name.trim().to_string(),
        kind: form.kind,
        exe_path: PathBuf::from(form.exe_path.trim()),
        process_name: form.process_name.trim().to_string(),
        start_action: form.start_action,
        stop_action: form.stop_action,
        termination_method: form.termination_method,
        stop_timeout_secs: parse_timeout_secs(&form.stop_timeout),
    }
}

/// Coerce the timeout text to seconds, falling back to the default on
/// anything unparseable
pub fn parse_timeout_secs(text: &str) -> u32 {
    match text.trim().parse() {
        Ok(secs) => secs,
        Err(_) => {
            debug!("Unparseable stop timeout '{text}', using default {DEFAULT_STOP_TIMEOUT_SECS}");
            DEFAULT_STOP_TIMEOUT_SECS
        }
    }
}

/// Derived-enablement rule: the termination-method and timeout controls are
/// interactive only while the stop action actually stops the app.
///
/// Pure function of the current selection; the dispatcher recomputes it
/// after every stop-action change.
pub fn termination_controls_enabled(stop_action: StopAction) -> bool {
    stop_action == StopAction::Stop
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_round_trip() {
        let record = GameRecord {
            display_name: "Elden Ring".to_string(),
            platform: Platform::Steam,
            exe_path: PathBuf::from("C:\\Games\\eldenring.exe"),
            process_names: vec!["eldenring".to_string(), "start_protected_game".to_string()],
            launch_args: vec!["-windowed".to_string()],
            managed_apps: vec!["obs".to_string()],
        };

        let form = game_to_form(&record);
        assert_eq!(form.process_names, "eldenring\nstart_protected_game");

        let back = game_from_form(&form);
        assert_eq!(back, record);
    }

    #[test]
    fn test_game_form_trims_and_drops_blank_lines() {
        let form = GameForm {
            display_name: "  Doom  ".to_string(),
            process_names: " doom \n\n doom_x64 \n".to_string(),
            ..GameForm::default()
        };

        let record = game_from_form(&form);
        assert_eq!(record.display_name, "Doom");
        assert_eq!(record.process_names, ["doom", "doom_x64"]);
    }

    #[test]
    fn test_app_round_trip() {
        let record = ManagedAppRecord {
            display_name: "OBS".to_string(),
            kind: AppKind::Obs,
            exe_path: PathBuf::from("C:\\obs\\obs64.exe"),
            process_name: "obs64".to_string(),
            start_action: StartAction::Start,
            stop_action: StopAction::Stop,
            termination_method: TerminationMethod::TerminateProcess,
            stop_timeout_secs: 25,
        };

        let back = app_from_form(&app_to_form(&record));
        assert_eq!(back, record);
    }

    #[test]
    fn test_timeout_coercion_falls_back_to_default() {
        assert_eq!(parse_timeout_secs("30"), 30);
        assert_eq!(parse_timeout_secs("  7 "), 7);
        assert_eq!(parse_timeout_secs("soon"), DEFAULT_STOP_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs(""), DEFAULT_STOP_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs("-3"), DEFAULT_STOP_TIMEOUT_SECS);
    }

    #[test]
    fn test_termination_controls_follow_stop_action() {
        assert!(termination_controls_enabled(StopAction::Stop));
        assert!(!termination_controls_enabled(StopAction::None));
    }
}
