//! Form binding module
//!
//! Synchronizes selected records with the visible form controls in both
//! directions, including type coercion and the derived-enablement rule for
//! the termination controls.

pub mod binding;

pub use binding::{
    GameForm, ManagedAppForm, app_from_form, app_to_form, game_from_form, game_to_form,
    parse_timeout_secs, termination_controls_enabled,
};
