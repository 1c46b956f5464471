//! The keyed value map handlers read from and write to, plus the
//! per-output no-update sentinel.

use std::collections::hash_map;
use std::collections::HashMap;

use serde_json::Value;

use crate::dependency::PatternId;
use crate::key::PropKey;

/// Value produced for one output property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Write this value to the property.
    Value(Value),
    /// Leave the property untouched.
    NoUpdate,
}

impl Update {
    /// True for the no-update sentinel.
    pub fn is_no_update(&self) -> bool {
        matches!(self, Update::NoUpdate)
    }

    /// The carried value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Update::Value(v) => Some(v),
            Update::NoUpdate => None,
        }
    }

    /// Consume into the carried value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Update::Value(v) => Some(v),
            Update::NoUpdate => None,
        }
    }
}

impl From<Value> for Update {
    fn from(v: Value) -> Self {
        Update::Value(v)
    }
}

/// Key-value view of a callback's inputs, states, or outputs.
///
/// Plain entries are addressed with their joined `"id.property"` string;
/// pattern entries with the `pattern_*` accessors, which spare the caller
/// from spelling out [`PropKey`]s.
///
/// ```
/// use dict_dispatch_core::dependency::pattern_id;
/// use dict_dispatch_core::map::CallbackMap;
/// use serde_json::json;
///
/// let mut out = CallbackMap::new();
/// out.insert("status.children", json!("ready"));
/// out.pattern_set(pattern_id([("type", "row".into()), ("index", 0.into())]), "children", json!("row 0"));
///
/// assert_eq!(out.get("status.children"), Some(&json!("ready")));
/// assert_eq!(out.pattern_keys().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackMap {
    entries: HashMap<PropKey, Value>,
}

impl CallbackMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a value under a key; returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<PropKey>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Read a value by key.
    pub fn get(&self, key: impl Into<PropKey>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    /// Remove a value by key.
    pub fn remove(&mut self, key: impl Into<PropKey>) -> Option<Value> {
        self.entries.remove(&key.into())
    }

    /// True if the key is present.
    pub fn contains_key(&self, key: impl Into<PropKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Set a value under a pattern identifier without building the key.
    pub fn pattern_set(
        &mut self,
        id: PatternId,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.entries.insert(
            PropKey::Pattern {
                id,
                property: property.into(),
            },
            value.into(),
        )
    }

    /// Read a value under a pattern identifier without building the key.
    pub fn pattern_get(&self, id: &PatternId, property: &str) -> Option<&Value> {
        // Keyed lookup needs an owned key; pattern ids are small maps.
        self.entries.get(&PropKey::Pattern {
            id: id.clone(),
            property: property.to_string(),
        })
    }

    /// All pattern-matched (identifier, property) pairs in the map.
    ///
    /// Plain keys are excluded; this is how a handler discovers which
    /// concrete components a wildcard bound to.
    pub fn pattern_keys(&self) -> Vec<(&PatternId, &str)> {
        self.entries
            .keys()
            .filter_map(|key| match key {
                PropKey::Pattern { id, property } => Some((id, property.as_str())),
                PropKey::Plain(_) => None,
            })
            .collect()
    }

    /// Move every entry of `other` into this map, overwriting on collision.
    pub fn merge(&mut self, other: CallbackMap) {
        self.entries.extend(other.entries);
    }

    /// Iterate over keys.
    pub fn keys(&self) -> impl Iterator<Item = &PropKey> {
        self.entries.keys()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&PropKey, &Value)> {
        self.entries.iter()
    }
}

impl FromIterator<(PropKey, Value)> for CallbackMap {
    fn from_iter<I: IntoIterator<Item = (PropKey, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CallbackMap {
    type Item = (PropKey, Value);
    type IntoIter = hash_map::IntoIter<PropKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CallbackMap {
    type Item = (&'a PropKey, &'a Value);
    type IntoIter = hash_map::Iter<'a, PropKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
