//! Configuration management module
//!
//! This module holds the configuration tree (games, managed apps, global
//! settings), the explicit per-collection ordering, legacy migration, and
//! loading/saving of the single JSON configuration document with atomic
//! writes to prevent corruption.

pub mod collection;
pub mod manager;
pub mod migrate;
pub mod models;
pub mod order;

pub use collection::{Collection, ORDER_KEY};
pub use manager::ConfigManager;
pub use models::{
    AppConfig, AppKind, GameRecord, GlobalSettings, ManagedAppRecord, Platform, StartAction,
    StopAction, TerminationMethod, WindowState,
};
pub use order::MoveDirection;
