//! GUI controller
//!
//! Wires the Slint main window to the editor controller: list selection,
//! add/duplicate/delete, reorder buttons, form field sync in both
//! directions, the unsaved-changes indicator, the close-confirmation
//! prompt, and the transient status line with its one-shot reset timer.
//!
//! Every callback runs on the UI thread; the editor controller lives in an
//! `Rc<RefCell<_>>` and is the only mutator of configuration state. The
//! startup update check is the sole background thread and talks to the UI
//! exclusively through `upgrade_in_event_loop`.

use crate::{AppLinkRow, MainWindow, RecordRow};
use launchdeck::config::{
    AppKind, MoveDirection, Platform, StartAction, StopAction, TerminationMethod, WindowState,
};
use launchdeck::controller::EditorController;
use launchdeck::error::get_user_friendly_error;
use launchdeck::forms::{self, GameForm, ManagedAppForm};
use launchdeck::utils::{Localizer, UpdateChecker};
use semver::Version;
use slint::{CloseRequestResponse, ComponentHandle, ModelRc, SharedString, TimerMode, VecModel};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// GitHub repository checked for new releases
const REPO_OWNER: &str = "engels74";
const REPO_NAME: &str = "LaunchDeck";

/// Minimum time between update checks (once a day)
const UPDATE_CHECK_INTERVAL_SECS: u64 = 60 * 60 * 24;

/// How long transient status messages stay before resetting to ready
const STATUS_RESET_DELAY: Duration = Duration::from_secs(5);

// Widget-index tables; order must match the combo-box models in main.slint.
const PLATFORMS: [Platform; 4] = [
    Platform::Standalone,
    Platform::Steam,
    Platform::Epic,
    Platform::Gog,
];
const KINDS: [AppKind; 4] = [
    AppKind::Executable,
    AppKind::Obs,
    AppKind::Discord,
    AppKind::VtubeStudio,
];
const START_ACTIONS: [StartAction; 2] = [StartAction::Start, StartAction::None];
const STOP_ACTIONS: [StopAction; 2] = [StopAction::Stop, StopAction::None];
const TERMINATIONS: [TerminationMethod; 2] = [
    TerminationMethod::CloseMainWindow,
    TerminationMethod::TerminateProcess,
];

/// Owns the main window and dispatches its events into the editor
pub struct GuiController {
    window: MainWindow,
    status_timer: Rc<slint::Timer>,
}

impl GuiController {
    /// Create the main window and wire every callback
    pub fn new(editor: EditorController) -> anyhow::Result<Self> {
        let window = MainWindow::new()?;
        let editor = Rc::new(RefCell::new(editor));
        let localizer = Rc::new(Localizer::new(
            &editor.borrow().config().settings.language,
        ));
        let status_timer = Rc::new(slint::Timer::default());

        restore_window_geometry(&window, &editor.borrow());
        window.set_status_text(localizer.message("status.ready").into());

        wire_game_callbacks(&window, &editor, &localizer, &status_timer);
        wire_app_callbacks(&window, &editor, &localizer);
        wire_common_callbacks(&window, &editor, &localizer, &status_timer);

        {
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            refresh_game_form(&window, &editor);
            refresh_app_list(&window, &editor);
            refresh_app_form(&window, &editor);
            sync_modified(&window, &editor);
        }

        spawn_update_check(&window, &editor);

        Ok(Self {
            window,
            status_timer,
        })
    }

    /// Run the GUI event loop until the window closes
    pub fn run(&self) -> anyhow::Result<()> {
        info!("Showing main window");
        self.window.run()?;
        // The pending status reset must not fire against a torn-down view.
        self.status_timer.stop();
        Ok(())
    }
}

// --- callback wiring -----------------------------------------------------

fn wire_game_callbacks(
    window: &MainWindow,
    editor: &Rc<RefCell<EditorController>>,
    localizer: &Rc<Localizer>,
    status_timer: &Rc<slint::Timer>,
) {
    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_game_selected(move |index| {
            let Some(window) = weak.upgrade() else { return };
            {
                let mut editor = editor.borrow_mut();
                let key = editor
                    .config()
                    .games
                    .order()
                    .get(usize::try_from(index).unwrap_or(usize::MAX))
                    .cloned();
                editor.select_game(key);
            }
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            refresh_game_form(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_add_game(move || {
            let Some(window) = weak.upgrade() else { return };
            editor.borrow_mut().add_game();
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_duplicate_game(move || {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_game().map(ToString::to_string);
            if let Some(key) = selected {
                if let Err(e) = editor.borrow_mut().duplicate_game(&key) {
                    show_warning(&get_user_friendly_error(&e));
                }
            }
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let localizer = localizer.clone();
        let weak = window.as_weak();
        window.on_delete_game(move || {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_game().map(ToString::to_string);
            if let Some(key) = selected {
                let name = editor
                    .borrow()
                    .config()
                    .games
                    .get(&key)
                    .map_or_else(|| key.clone(), |game| game.display_name.clone());
                if !confirm(
                    &localizer.message("confirm.delete.title"),
                    &localizer.format("confirm.delete.body", &[&name]),
                ) {
                    return;
                }
                if let Err(e) = editor.borrow_mut().delete_game(&key) {
                    show_warning(&get_user_friendly_error(&e));
                }
            }
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_move_game(move |direction| {
            let Some(window) = weak.upgrade() else { return };
            let Some(direction) = parse_direction(&direction) else { return };
            let selected = editor.borrow().selected_game().map(ToString::to_string);
            if let Some(key) = selected {
                editor.borrow_mut().move_game(&key, direction);
            }
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_game_key_edited(move |new_key| {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_game().map(ToString::to_string);
            if let Some(old_key) = selected {
                let new_key = new_key.trim().to_string();
                if let Err(e) = editor.borrow_mut().rename_game(&old_key, &new_key) {
                    show_warning(&get_user_friendly_error(&e));
                    window.set_game_key(old_key.into());
                    return;
                }
            }
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_game_form_changed(move || {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_game().map(ToString::to_string);
            if let Some(key) = selected {
                let linked = editor
                    .borrow()
                    .config()
                    .games
                    .get(&key)
                    .map(|game| game.managed_apps.clone())
                    .unwrap_or_default();
                let form = read_game_form(&window, linked);
                if let Err(e) = editor.borrow_mut().apply_game_form(&key, &form) {
                    warn!("Ignoring edit for vanished game '{key}': {e}");
                }
            }
            // Only the list and the dirty marker refresh here: rewriting the
            // form fields mid-keystroke would fight the text cursor.
            let editor = editor.borrow();
            refresh_game_list(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_game_app_link_toggled(move |index, checked| {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_game().map(ToString::to_string);
            if let Some(key) = selected {
                let (app_key, form) = {
                    let editor = editor.borrow();
                    let app_key = editor
                        .config()
                        .managed_apps
                        .order()
                        .get(usize::try_from(index).unwrap_or(usize::MAX))
                        .cloned();
                    let form = editor.config().games.get(&key).map(forms::game_to_form);
                    (app_key, form)
                };
                if let (Some(app_key), Some(mut form)) = (app_key, form) {
                    if checked {
                        if !form.linked_apps.iter().any(|k| *k == app_key) {
                            form.linked_apps.push(app_key);
                        }
                    } else {
                        form.linked_apps.retain(|k| *k != app_key);
                    }
                    if let Err(e) = editor.borrow_mut().apply_game_form(&key, &form) {
                        warn!("Ignoring link toggle for vanished game '{key}': {e}");
                    }
                }
            }
            let editor = editor.borrow();
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let localizer = localizer.clone();
        let status_timer = status_timer.clone();
        let weak = window.as_weak();
        window.on_launch_game(move || {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_game().map(ToString::to_string);
            let Some(key) = selected else { return };

            let (result, name) = {
                let editor = editor.borrow();
                let name = editor
                    .config()
                    .games
                    .get(&key)
                    .map_or_else(|| key.clone(), |game| game.display_name.clone());
                (editor.launch_game(&key), name)
            };
            match result {
                Ok(()) => show_transient_status(
                    &window,
                    &localizer,
                    &status_timer,
                    localizer.format("status.launched", &[&name]),
                ),
                Err(e) => show_warning(&get_user_friendly_error(&e)),
            }
        });
    }
}

fn wire_app_callbacks(
    window: &MainWindow,
    editor: &Rc<RefCell<EditorController>>,
    localizer: &Rc<Localizer>,
) {
    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_app_selected(move |index| {
            let Some(window) = weak.upgrade() else { return };
            {
                let mut editor = editor.borrow_mut();
                let key = editor
                    .config()
                    .managed_apps
                    .order()
                    .get(usize::try_from(index).unwrap_or(usize::MAX))
                    .cloned();
                editor.select_app(key);
            }
            let editor = editor.borrow();
            refresh_app_list(&window, &editor);
            refresh_app_form(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_add_app(move || {
            let Some(window) = weak.upgrade() else { return };
            editor.borrow_mut().add_managed_app();
            let editor = editor.borrow();
            refresh_app_list(&window, &editor);
            refresh_app_form(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_duplicate_app(move || {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_app().map(ToString::to_string);
            if let Some(key) = selected {
                if let Err(e) = editor.borrow_mut().duplicate_managed_app(&key) {
                    show_warning(&get_user_friendly_error(&e));
                }
            }
            let editor = editor.borrow();
            refresh_app_list(&window, &editor);
            refresh_app_form(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let localizer = localizer.clone();
        let weak = window.as_weak();
        window.on_delete_app(move || {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_app().map(ToString::to_string);
            if let Some(key) = selected {
                let name = editor
                    .borrow()
                    .config()
                    .managed_apps
                    .get(&key)
                    .map_or_else(|| key.clone(), |app| app.display_name.clone());
                if !confirm(
                    &localizer.message("confirm.delete.title"),
                    &localizer.format("confirm.delete.body", &[&name]),
                ) {
                    return;
                }
                if let Err(e) = editor.borrow_mut().delete_managed_app(&key) {
                    show_warning(&get_user_friendly_error(&e));
                }
            }
            let editor = editor.borrow();
            refresh_app_list(&window, &editor);
            refresh_app_form(&window, &editor);
            // Back-references may have been stripped from the games tab.
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_move_app(move |direction| {
            let Some(window) = weak.upgrade() else { return };
            let Some(direction) = parse_direction(&direction) else { return };
            let selected = editor.borrow().selected_app().map(ToString::to_string);
            if let Some(key) = selected {
                editor.borrow_mut().move_managed_app(&key, direction);
            }
            let editor = editor.borrow();
            refresh_app_list(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_app_key_edited(move |new_key| {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_app().map(ToString::to_string);
            if let Some(old_key) = selected {
                let new_key = new_key.trim().to_string();
                if let Err(e) = editor.borrow_mut().rename_managed_app(&old_key, &new_key) {
                    show_warning(&get_user_friendly_error(&e));
                    window.set_app_key(old_key.into());
                    return;
                }
            }
            let editor = editor.borrow();
            refresh_app_list(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }

    {
        let editor = editor.clone();
        let weak = window.as_weak();
        window.on_app_form_changed(move || {
            let Some(window) = weak.upgrade() else { return };
            let selected = editor.borrow().selected_app().map(ToString::to_string);
            if let Some(key) = selected {
                let form = read_app_form(&window);
                // The termination controls follow the stop action; recompute
                // after every selector change.
                window.set_termination_enabled(forms::termination_controls_enabled(
                    form.stop_action,
                ));
                if let Err(e) = editor.borrow_mut().apply_app_form(&key, &form) {
                    warn!("Ignoring edit for vanished app '{key}': {e}");
                }
            }
            let editor = editor.borrow();
            refresh_app_list(&window, &editor);
            refresh_game_form(&window, &editor);
            sync_modified(&window, &editor);
        });
    }
}

fn wire_common_callbacks(
    window: &MainWindow,
    editor: &Rc<RefCell<EditorController>>,
    localizer: &Rc<Localizer>,
    status_timer: &Rc<slint::Timer>,
) {
    {
        let editor = editor.clone();
        let localizer = localizer.clone();
        let status_timer = status_timer.clone();
        let weak = window.as_weak();
        window.on_save_clicked(move || {
            let Some(window) = weak.upgrade() else { return };
            match editor.borrow_mut().save() {
                Ok(()) => show_transient_status(
                    &window,
                    &localizer,
                    &status_timer,
                    localizer.message("status.saved"),
                ),
                // Save failures block with a dialog; in-memory state and the
                // dirty flag are untouched so the user can retry.
                Err(e) => show_warning(&get_user_friendly_error(&e)),
            }
            sync_modified(&window, &editor.borrow());
        });
    }

    {
        let weak = window.as_weak();
        window.on_open_release_page(move || {
            let Some(window) = weak.upgrade() else { return };
            let url = window.get_update_url();
            if url.is_empty() {
                return;
            }
            if let Err(e) = open::that(url.as_str()) {
                warn!("Failed to open release page: {e}");
            }
        });
    }

    {
        let editor = editor.clone();
        let localizer = localizer.clone();
        let weak = window.as_weak();
        window.on_update_available(move |latest, url| {
            let Some(window) = weak.upgrade() else { return };
            editor
                .borrow_mut()
                .record_update_check(UpdateChecker::current_timestamp(), latest.as_str());
            if !url.is_empty() {
                window.set_update_text(
                    localizer
                        .format("status.update_available", &[latest.as_str()])
                        .into(),
                );
                window.set_update_url(url);
            }
        });
    }

    {
        let editor = editor.clone();
        let localizer = localizer.clone();
        let weak = window.as_weak();
        window.window().on_close_requested(move || {
            let dirty = editor.borrow().needs_close_confirmation();
            if dirty
                && !confirm(
                    &localizer.message("confirm.close.title"),
                    &localizer.message("confirm.close.body"),
                )
            {
                return CloseRequestResponse::KeepWindowShown;
            }

            // On a clean close the window geometry is worth keeping; a
            // discard-and-close must not write anything.
            if !dirty {
                if let Some(window) = weak.upgrade() {
                    let position = window.window().position();
                    let size = window.window().size();
                    let mut editor = editor.borrow_mut();
                    editor.update_window_state(WindowState {
                        x: position.x,
                        y: position.y,
                        width: size.width,
                        height: size.height,
                    });
                    if let Err(e) = editor.save() {
                        warn!("Failed to persist window state on close: {e}");
                    }
                }
            }
            CloseRequestResponse::HideWindow
        });
    }
}

// --- view refresh helpers ------------------------------------------------

fn record_rows<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> ModelRc<RecordRow> {
    let rows: Vec<RecordRow> = entries
        .map(|(key, name)| RecordRow {
            key: key.into(),
            name: name.into(),
        })
        .collect();
    ModelRc::new(VecModel::from(rows))
}

fn refresh_game_list(window: &MainWindow, editor: &EditorController) {
    window.set_games(record_rows(
        editor
            .config()
            .games
            .iter_ordered()
            .map(|(key, game)| (key, game.display_name.as_str())),
    ));
    let index = editor
        .selected_game()
        .and_then(|key| editor.config().games.index_of(key))
        .and_then(|index| i32::try_from(index).ok())
        .unwrap_or(-1);
    window.set_selected_game_index(index);
}

fn refresh_app_list(window: &MainWindow, editor: &EditorController) {
    window.set_managed_apps(record_rows(
        editor
            .config()
            .managed_apps
            .iter_ordered()
            .map(|(key, app)| (key, app.display_name.as_str())),
    ));
    let index = editor
        .selected_app()
        .and_then(|key| editor.config().managed_apps.index_of(key))
        .and_then(|index| i32::try_from(index).ok())
        .unwrap_or(-1);
    window.set_selected_app_index(index);
}

fn refresh_game_form(window: &MainWindow, editor: &EditorController) {
    let selected = editor
        .selected_game()
        .and_then(|key| editor.config().games.get(key).map(|game| (key, game)));

    match selected {
        Some((key, record)) => {
            let form = forms::game_to_form(record);
            window.set_game_form_enabled(true);
            window.set_game_key(key.into());
            window.set_game_name(form.display_name.into());
            window.set_game_platform_index(index_in(&PLATFORMS, form.platform));
            window.set_game_exe_path(form.exe_path.into());
            window.set_game_process_names(form.process_names.into());
            window.set_game_launch_args(form.launch_args.into());
        }
        None => {
            window.set_game_form_enabled(false);
            window.set_game_key(SharedString::new());
            window.set_game_name(SharedString::new());
            window.set_game_platform_index(0);
            window.set_game_exe_path(SharedString::new());
            window.set_game_process_names(SharedString::new());
            window.set_game_launch_args(SharedString::new());
        }
    }

    let linked = selected.map(|(_, record)| record.managed_apps.as_slice());
    let links: Vec<AppLinkRow> = editor
        .config()
        .managed_apps
        .iter_ordered()
        .map(|(key, app)| AppLinkRow {
            key: key.into(),
            name: app.display_name.as_str().into(),
            linked: linked.is_some_and(|refs| refs.iter().any(|k| k == key)),
        })
        .collect();
    window.set_game_app_links(ModelRc::new(VecModel::from(links)));
}

fn refresh_app_form(window: &MainWindow, editor: &EditorController) {
    let selected = editor
        .selected_app()
        .and_then(|key| editor.config().managed_apps.get(key).map(|app| (key, app)));

    match selected {
        Some((key, record)) => {
            let form = forms::app_to_form(record);
            window.set_app_form_enabled(true);
            window.set_termination_enabled(forms::termination_controls_enabled(form.stop_action));
            window.set_app_key(key.into());
            window.set_app_name(form.display_name.into());
            window.set_app_kind_index(index_in(&KINDS, form.kind));
            window.set_app_exe_path(form.exe_path.into());
            window.set_app_process_name(form.process_name.into());
            window.set_app_start_action_index(index_in(&START_ACTIONS, form.start_action));
            window.set_app_stop_action_index(index_in(&STOP_ACTIONS, form.stop_action));
            window.set_app_termination_index(index_in(&TERMINATIONS, form.termination_method));
            window.set_app_stop_timeout(form.stop_timeout.into());
        }
        None => {
            window.set_app_form_enabled(false);
            window.set_termination_enabled(false);
            window.set_app_key(SharedString::new());
            window.set_app_name(SharedString::new());
            window.set_app_kind_index(0);
            window.set_app_exe_path(SharedString::new());
            window.set_app_process_name(SharedString::new());
            window.set_app_start_action_index(0);
            window.set_app_stop_action_index(0);
            window.set_app_termination_index(0);
            window.set_app_stop_timeout(SharedString::new());
        }
    }
}

fn sync_modified(window: &MainWindow, editor: &EditorController) {
    window.set_modified(editor.is_dirty());
}

// --- form read-back ------------------------------------------------------

fn read_game_form(window: &MainWindow, linked_apps: Vec<String>) -> GameForm {
    GameForm {
        display_name: window.get_game_name().to_string(),
        platform: at_index(&PLATFORMS, window.get_game_platform_index()),
        exe_path: window.get_game_exe_path().to_string(),
        process_names: window.get_game_process_names().to_string(),
        launch_args: window.get_game_launch_args().to_string(),
        linked_apps,
    }
}

fn read_app_form(window: &MainWindow) -> ManagedAppForm {
    ManagedAppForm {
        display_name: window.get_app_name().to_string(),
        kind: at_index(&KINDS, window.get_app_kind_index()),
        exe_path: window.get_app_exe_path().to_string(),
        process_name: window.get_app_process_name().to_string(),
        start_action: at_index(&START_ACTIONS, window.get_app_start_action_index()),
        stop_action: at_index(&STOP_ACTIONS, window.get_app_stop_action_index()),
        termination_method: at_index(&TERMINATIONS, window.get_app_termination_index()),
        stop_timeout: window.get_app_stop_timeout().to_string(),
    }
}

fn index_in<T: PartialEq>(table: &[T], value: T) -> i32 {
    table
        .iter()
        .position(|candidate| *candidate == value)
        .and_then(|index| i32::try_from(index).ok())
        .unwrap_or(0)
}

fn at_index<T: Copy + Default>(table: &[T], index: i32) -> T {
    usize::try_from(index)
        .ok()
        .and_then(|index| table.get(index).copied())
        .unwrap_or_default()
}

fn parse_direction(direction: &str) -> Option<MoveDirection> {
    match direction {
        "top" => Some(MoveDirection::Top),
        "up" => Some(MoveDirection::Up),
        "down" => Some(MoveDirection::Down),
        "bottom" => Some(MoveDirection::Bottom),
        other => {
            debug!("Unknown move direction '{other}'");
            None
        }
    }
}

// --- status line ---------------------------------------------------------

/// Show a transient status message and (re)arm the one-shot reset back to
/// ready. Restarting the timer cancels any pending reset.
fn show_transient_status(
    window: &MainWindow,
    localizer: &Rc<Localizer>,
    status_timer: &Rc<slint::Timer>,
    message: String,
) {
    window.set_status_text(message.into());
    let weak = window.as_weak();
    let ready = localizer.message("status.ready");
    status_timer.start(TimerMode::SingleShot, STATUS_RESET_DELAY, move || {
        if let Some(window) = weak.upgrade() {
            window.set_status_text(ready.as_str().into());
        }
    });
}

// --- window geometry -----------------------------------------------------

fn restore_window_geometry(window: &MainWindow, editor: &EditorController) {
    let state = &editor.config().settings.window_state;
    window
        .window()
        .set_position(slint::PhysicalPosition::new(state.x, state.y));
    #[expect(
        clippy::cast_precision_loss,
        reason = "Window dimensions are far below f32 precision limits"
    )]
    window
        .window()
        .set_size(slint::LogicalSize::new(state.width as f32, state.height as f32));
}

// --- update check --------------------------------------------------------

fn spawn_update_check(window: &MainWindow, editor: &Rc<RefCell<EditorController>>) {
    let settings = editor.borrow().config().settings.clone();
    if !settings.check_updates {
        debug!("Update checks disabled in settings");
        return;
    }

    let current_version = Version::parse(env!("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| Version::new(0, 0, 0));
    let checker = UpdateChecker::new(
        REPO_OWNER,
        REPO_NAME,
        current_version,
        UPDATE_CHECK_INTERVAL_SECS,
    );
    if !checker.should_check(settings.last_update_check_time) {
        debug!("Skipping update check (rate limited)");
        return;
    }

    let weak = window.as_weak();
    std::thread::spawn(move || match checker.check_for_updates() {
        Ok(result) => {
            let latest = result.latest_version.to_string();
            let url = if result.update_available {
                result.release_url
            } else {
                String::new()
            };
            let _ = weak.upgrade_in_event_loop(move |window| {
                window.invoke_update_available(latest.into(), url.into());
            });
        }
        Err(e) => warn!("Update check failed: {e}"),
    });
}

// --- dialogs -------------------------------------------------------------

#[cfg(windows)]
fn show_warning(message: &str) {
    rfd::MessageDialog::new()
        .set_title("LaunchDeck")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Warning)
        .show();
}

#[cfg(not(windows))]
fn show_warning(message: &str) {
    warn!("{message}");
}

#[cfg(windows)]
fn confirm(title: &str, body: &str) -> bool {
    rfd::MessageDialog::new()
        .set_title(title)
        .set_description(body)
        .set_buttons(rfd::MessageButtons::YesNo)
        .set_level(rfd::MessageLevel::Warning)
        .show()
        == rfd::MessageDialogResult::Yes
}

#[cfg(not(windows))]
fn confirm(title: &str, body: &str) -> bool {
    // Headless fallback: log and proceed.
    warn!("{title}: {body} (auto-confirmed)");
    true
}
