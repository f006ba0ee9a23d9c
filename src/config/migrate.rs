//! Legacy configuration migration
//!
//! Older configuration files used several field-name aliases for the same
//! logical attribute (for example `path` and `executable` for `exe_path`)
//! and stored some list-valued fields as scalars. Instead of checking every
//! alias on every read, the raw JSON document is normalized once at load
//! time: aliases resolve into canonical fields in a fixed precedence order
//! (canonical name first, then aliases in declared order), losing aliases
//! are dropped, and the schema version is stamped.

use serde_json::{Map, Value};
use tracing::{debug, info};

/// Current configuration schema version
pub const CONFIG_VERSION: u32 = 2;

/// Alias table: canonical field name, then legacy names in precedence order
type AliasTable = &'static [(&'static str, &'static [&'static str])];

const GAME_ALIASES: AliasTable = &[
    ("exe_path", &["path", "executable"]),
    ("process_names", &["processes", "process_name"]),
    ("managed_apps", &["apps", "linked_apps"]),
    ("launch_args", &["args"]),
];

const MANAGED_APP_ALIASES: AliasTable = &[
    ("exe_path", &["path", "executable"]),
    ("process_name", &["process"]),
    ("stop_timeout_secs", &["timeout", "kill_timeout"]),
    ("termination_method", &["kill_method"]),
    ("start_action", &["on_start"]),
    ("stop_action", &["on_stop"]),
];

/// Fields that hold arrays today but were scalars in version 1
const GAME_LIST_FIELDS: &[&str] = &["process_names", "managed_apps", "launch_args"];

/// Normalize a raw configuration document in place.
///
/// Idempotent: a document already at [`CONFIG_VERSION`] passes through
/// untouched. Only objects are rewritten; anything malformed is left for
/// the typed deserializer to report.
pub fn migrate(document: &mut Value) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    let version = root
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or(1)
        .try_into()
        .unwrap_or(1u32);
    if version >= CONFIG_VERSION {
        return;
    }

    info!("Migrating configuration from schema version {version} to {CONFIG_VERSION}");

    if let Some(games) = root.get_mut("games").and_then(Value::as_object_mut) {
        for (key, record) in games.iter_mut() {
            if let Some(record) = record.as_object_mut() {
                normalize_record(key, record, GAME_ALIASES);
                for field in GAME_LIST_FIELDS {
                    wrap_scalar_in_list(record, field);
                }
            }
        }
    }

    if let Some(apps) = root.get_mut("managed_apps").and_then(Value::as_object_mut) {
        for (key, record) in apps.iter_mut() {
            if let Some(record) = record.as_object_mut() {
                normalize_record(key, record, MANAGED_APP_ALIASES);
            }
        }
    }

    root.insert("version".to_string(), Value::from(CONFIG_VERSION));
}

/// Resolve every alias of a record into its canonical field.
///
/// When the canonical field is already present it wins and all aliases are
/// discarded; otherwise the first present alias (in declared order) is
/// promoted and the rest are discarded.
fn normalize_record(key: &str, record: &mut Map<String, Value>, aliases: AliasTable) {
    // The reserved order entry is not a record.
    if key == super::ORDER_KEY {
        return;
    }

    for (canonical, legacy_names) in aliases {
        let mut resolved = record.contains_key(*canonical);
        for legacy in *legacy_names {
            let Some(value) = record.remove(*legacy) else {
                continue;
            };
            if resolved {
                debug!("record '{key}': dropping shadowed legacy field '{legacy}'");
            } else {
                debug!("record '{key}': promoting legacy field '{legacy}' to '{canonical}'");
                record.insert((*canonical).to_string(), value);
                resolved = true;
            }
        }
    }
}

/// Version 1 stored some list fields as a single scalar; wrap them
fn wrap_scalar_in_list(record: &mut Map<String, Value>, field: &str) {
    if let Some(value) = record.get_mut(field) {
        if !value.is_array() && !value.is_null() {
            let scalar = value.take();
            *value = Value::Array(vec![scalar]);
        }
    }
}
