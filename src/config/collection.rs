//! Ordered record collections
//!
//! A [`Collection`] pairs a key→record map with the explicit order array
//! from [`crate::config::order`]. Every key addition and removal updates
//! both sides together so the order is always a permutation of the map's
//! key set.
//!
//! On disk a collection is a single JSON object with one property per
//! record plus the reserved `"#order"` property holding the order array.
//! The `#` prefix keeps the reserved property sorted apart from normal ids.

use crate::config::order::{self, MoveDirection};
use crate::error::{LaunchDeckError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Reserved JSON property holding a collection's order array
pub const ORDER_KEY: &str = "#order";

/// A key→record map with an explicit, persisted ordering over its keys
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    records: BTreeMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with this key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Look up a record by key
    pub fn get(&self, key: &str) -> Option<&T> {
        self.records.get(key)
    }

    /// Look up a record by key for mutation
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.records.get_mut(key)
    }

    /// The explicit key ordering
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Position of a key within the order, if present
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }

    /// Iterate records following the explicit order
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(|key| self.records.get(key).map(|record| (key.as_str(), record)))
    }

    /// Insert a new record at the end of the order.
    ///
    /// Fails with [`LaunchDeckError::DuplicateKey`] when the key is taken;
    /// the collection is left unchanged in that case.
    pub fn insert(&mut self, key: String, record: T) -> Result<()> {
        if self.records.contains_key(&key) {
            return Err(LaunchDeckError::DuplicateKey(key));
        }
        self.order.push(key.clone());
        self.records.insert(key, record);
        Ok(())
    }

    /// Insert a new record directly after `anchor` in the order.
    ///
    /// Used by duplication so the copy lands next to its source. An unknown
    /// anchor appends at the end instead.
    pub fn insert_after(&mut self, anchor: &str, key: String, record: T) -> Result<()> {
        if self.records.contains_key(&key) {
            return Err(LaunchDeckError::DuplicateKey(key));
        }
        match self.index_of(anchor) {
            Some(index) => self.order.insert(index + 1, key.clone()),
            None => {
                debug!("insert_after: anchor '{anchor}' not in order, appending '{key}' at end");
                self.order.push(key.clone());
            }
        }
        self.records.insert(key, record);
        Ok(())
    }

    /// Remove a record and its order entry together
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let record = self.records.remove(key)?;
        self.order.retain(|k| k != key);
        Some(record)
    }

    /// Rename a record key, keeping its position in the order.
    ///
    /// All-or-nothing: the new key is validated before anything mutates, so
    /// a rejected rename leaves map and order untouched.
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> Result<()> {
        if old_key == new_key {
            return Ok(());
        }
        if self.records.contains_key(new_key) {
            return Err(LaunchDeckError::DuplicateKey(new_key.to_string()));
        }
        let Some(record) = self.records.remove(old_key) else {
            return Err(LaunchDeckError::RecordNotFound(old_key.to_string()));
        };
        self.records.insert(new_key.to_string(), record);
        for entry in &mut self.order {
            if entry == old_key {
                *entry = new_key.to_string();
            }
        }
        Ok(())
    }

    /// Generate an unused key of the form `{prefix}{n}` with the smallest
    /// free `n` starting from 1
    pub fn fresh_key(&self, prefix: &str) -> String {
        (1..)
            .map(|n| format!("{prefix}{n}"))
            .find(|candidate| !self.records.contains_key(candidate))
            .expect("unbounded key space always yields a free key")
    }

    /// Reconcile the order against the record map (drop stale entries,
    /// append missing keys). Returns `true` when the order was adjusted.
    pub fn reconcile_order(&mut self) -> bool {
        order::reconcile(&mut self.order, self.records.keys().map(String::as_str))
    }

    /// Move the record at `source_index` to `target_index`
    /// (see [`order::move_to_position`])
    pub fn move_to_position(&mut self, source_index: usize, target_index: usize) -> bool {
        order::move_to_position(&mut self.order, source_index, target_index)
    }

    /// Move a record one of the discrete directions
    /// (see [`order::move_relative`])
    pub fn move_relative(&mut self, key: &str, direction: MoveDirection) -> bool {
        order::move_relative(&mut self.order, key, direction)
    }

    /// Drag-and-drop reorder (see [`order::drop_at`])
    pub fn drop_at(&mut self, dragged_key: &str, target_key: Option<&str>, insert_above: bool) -> bool {
        order::drop_at(&mut self.order, dragged_key, target_key, insert_above)
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.records.len() + 1))?;
        map.serialize_entry(ORDER_KEY, &self.order)?;
        for (key, record) in &self.records {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for CollectionVisitor<T> {
            type Value = Collection<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of records with an optional \"#order\" array")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = BTreeMap::new();
                let mut order: Vec<String> = Vec::new();

                while let Some(key) = access.next_key::<String>()? {
                    if key == ORDER_KEY {
                        order = access.next_value()?;
                    } else {
                        let record = access.next_value()?;
                        records.insert(key, record);
                    }
                }

                let mut collection = Collection { records, order };
                // A hand-edited file or an interrupted save can leave the
                // order out of sync with the records; repair silently.
                if collection.reconcile_order() {
                    debug!("collection order reconciled with record keys on load");
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Collection<u32> {
        let mut collection = Collection::new();
        collection.insert("a".to_string(), 1).unwrap();
        collection.insert("b".to_string(), 2).unwrap();
        collection.insert("c".to_string(), 3).unwrap();
        collection
    }

    #[test]
    fn test_insert_appends_to_order() {
        let collection = sample();
        assert_eq!(collection.order(), ["a", "b", "c"]);
        assert_eq!(collection.get("b"), Some(&2));
    }

    #[test]
    fn test_insert_duplicate_key_rejected() {
        let mut collection = sample();
        let err = collection.insert("b".to_string(), 9).unwrap_err();
        assert!(matches!(err, LaunchDeckError::DuplicateKey(key) if key == "b"));
        // Unchanged on rejection.
        assert_eq!(collection.get("b"), Some(&2));
        assert_eq!(collection.order(), ["a", "b", "c"]);
    }

    #[test]
    fn test_insert_after_places_copy_next_to_source() {
        let mut collection = sample();
        collection.insert_after("a", "a2".to_string(), 11).unwrap();
        assert_eq!(collection.order(), ["a", "a2", "b", "c"]);
    }

    #[test]
    fn test_remove_updates_both_sides() {
        let mut collection = sample();
        assert_eq!(collection.remove("b"), Some(2));
        assert_eq!(collection.order(), ["a", "c"]);
        assert!(!collection.contains_key("b"));
        assert_eq!(collection.remove("b"), None);
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut collection = sample();
        collection.rename("b", "renamed").unwrap();
        assert_eq!(collection.order(), ["a", "renamed", "c"]);
        assert_eq!(collection.get("renamed"), Some(&2));
        assert!(!collection.contains_key("b"));
    }

    #[test]
    fn test_rename_collision_leaves_collection_untouched() {
        let mut collection = sample();
        let err = collection.rename("b", "c").unwrap_err();
        assert!(matches!(err, LaunchDeckError::DuplicateKey(_)));
        assert_eq!(collection.order(), ["a", "b", "c"]);
        assert_eq!(collection.get("b"), Some(&2));
    }

    #[test]
    fn test_rename_missing_key() {
        let mut collection = sample();
        let err = collection.rename("zz", "yy").unwrap_err();
        assert!(matches!(err, LaunchDeckError::RecordNotFound(_)));
    }

    #[test]
    fn test_fresh_key_skips_taken_ids() {
        let mut collection = Collection::new();
        collection.insert("game1".to_string(), 1).unwrap();
        collection.insert("game3".to_string(), 3).unwrap();
        assert_eq!(collection.fresh_key("game"), "game2");
        collection.insert("game2".to_string(), 2).unwrap();
        assert_eq!(collection.fresh_key("game"), "game4");
    }

    #[test]
    fn test_iter_ordered_follows_order_not_map() {
        let mut collection = sample();
        collection.move_relative("c", MoveDirection::Top);
        let keys: Vec<&str> = collection.iter_ordered().map(|(key, _)| key).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn test_serialize_emits_reserved_order_property() {
        let collection = sample();
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value[ORDER_KEY], json!(["a", "b", "c"]));
        assert_eq!(value["a"], json!(1));
        assert_eq!(value["c"], json!(3));
    }

    #[test]
    fn test_round_trip_preserves_custom_order() {
        let mut collection = sample();
        collection.move_relative("a", MoveDirection::Bottom);

        let json = serde_json::to_string(&collection).unwrap();
        let back: Collection<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
        assert_eq!(back.order(), ["b", "c", "a"]);
    }

    #[test]
    fn test_deserialize_without_order_uses_map_iteration_order() {
        let json = r#"{"b": 2, "a": 1, "c": 3}"#;
        let collection: Collection<u32> = serde_json::from_str(json).unwrap();
        // BTreeMap iteration is sorted, so the created order is deterministic.
        assert_eq!(collection.order(), ["a", "b", "c"]);
    }

    #[test]
    fn test_deserialize_reconciles_drifted_order() {
        // "gone" has no record, "d" has no order entry.
        let json = r##"{"#order": ["a", "gone", "b"], "a": 1, "b": 2, "d": 4}"##;
        let collection: Collection<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(collection.order(), ["a", "b", "d"]);
        assert_eq!(collection.len(), 3);
    }
}
