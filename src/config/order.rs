//! Explicit ordering over a collection's keys
//!
//! Every collection persists an order array alongside its key→record map so
//! the UI list order survives saves independently of map iteration order.
//! The operations here are plain list transformations over that array. A
//! missing source key is a logged no-op, never an error: the editor must
//! stay usable even if the order has drifted from the map.
//!
//! All move operations use insert-after-removal semantics: the target index
//! is interpreted against the array with the source element already removed.
//! Moving `[G1,G2,G3,G4]` with source 0 and target 2 therefore yields
//! `[G2,G3,G1,G4]`, not the off-by-one result a naive insert-before-removal
//! would produce.

use std::collections::BTreeSet;
use tracing::debug;

/// Discrete reorder commands available on a selected row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Move to the first position
    Top,
    /// Move one position towards the front
    Up,
    /// Move one position towards the back
    Down,
    /// Move to the last position
    Bottom,
}

/// Move the element at `source_index` so it ends up at `target_index`.
///
/// `target_index` is interpreted against the array with the source already
/// removed and is clamped to the valid insertion range. Returns `true` when
/// the order changed; moving an element onto its own position is a no-op.
pub fn move_to_position(order: &mut Vec<String>, source_index: usize, target_index: usize) -> bool {
    let len = order.len();
    if source_index >= len {
        debug!("move_to_position: source index {source_index} out of range (len {len})");
        return false;
    }

    // After removal the valid insertion positions are 0..=len-1.
    let target_index = target_index.min(len - 1);
    if target_index == source_index {
        return false;
    }

    let key = order.remove(source_index);
    order.insert(target_index, key);
    true
}

/// Move `key` one of the four discrete directions.
///
/// Returns `true` when the order changed. An absent key is a logged no-op.
pub fn move_relative(order: &mut Vec<String>, key: &str, direction: MoveDirection) -> bool {
    let Some(index) = order.iter().position(|k| k == key) else {
        debug!("move_relative: key '{key}' not present in order");
        return false;
    };

    let target = match direction {
        MoveDirection::Top => 0,
        MoveDirection::Up => index.saturating_sub(1),
        MoveDirection::Down => index + 1,
        MoveDirection::Bottom => order.len() - 1,
    };

    move_to_position(order, index, target)
}

/// Drag-and-drop reorder: move `dragged_key` next to `target_key`.
///
/// `insert_above` selects whether the dragged row lands directly before or
/// directly after the target row. A missing target is treated as a drop past
/// the end of the list (append); a missing dragged key is a logged no-op.
pub fn drop_at(
    order: &mut Vec<String>,
    dragged_key: &str,
    target_key: Option<&str>,
    insert_above: bool,
) -> bool {
    let Some(source) = order.iter().position(|k| k == dragged_key) else {
        debug!("drop_at: dragged key '{dragged_key}' not present in order");
        return false;
    };

    let target = match target_key.and_then(|key| order.iter().position(|k| k == key)) {
        None => order.len(),
        Some(target_index) => {
            let slot = if insert_above {
                target_index
            } else {
                target_index + 1
            };
            // Translate from a slot in the full array to an insertion index
            // in the array with the dragged element removed.
            if source < slot { slot - 1 } else { slot }
        }
    };

    move_to_position(order, source, target)
}

/// Reconcile the order with the authoritative key set.
///
/// Creates the order from `keys` iteration order when empty, otherwise drops
/// stale entries (and duplicates) and appends missing keys at the end.
/// Idempotent: a second call with the same keys changes nothing. Returns
/// `true` when the order was adjusted.
pub fn reconcile<'a>(order: &mut Vec<String>, keys: impl IntoIterator<Item = &'a str>) -> bool {
    let keys: Vec<&str> = keys.into_iter().collect();
    let key_set: BTreeSet<&str> = keys.iter().copied().collect();

    let mut changed = false;

    // Drop entries no longer backed by a record, and duplicate entries.
    let mut seen: BTreeSet<String> = BTreeSet::new();
    order.retain(|key| {
        let keep = key_set.contains(key.as_str()) && seen.insert(key.clone());
        if !keep {
            debug!("reconcile: dropping stale order entry '{key}'");
            changed = true;
        }
        keep
    });

    // Append records that have no order entry yet, in key iteration order.
    for key in keys {
        if !order.iter().any(|k| k == key) {
            debug!("reconcile: appending missing order entry '{key}'");
            order.push(key.to_string());
            changed = true;
        }
    }

    changed
}
