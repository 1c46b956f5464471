//! Canonical lookup keys for (component id, property) pairs.

use std::fmt;

use crate::dependency::{ComponentId, PatternId};

/// Hashable lookup key for one component property.
///
/// Plain identifiers join id and property into a single `"id.property"`
/// string, so a string literal in that form is already a key. Pattern
/// identifiers keep their sorted field map next to the property name, which
/// makes the key independent of field order without stringifying the id.
///
/// ```
/// use dict_dispatch_core::dependency::{pattern_id, ComponentId};
/// use dict_dispatch_core::key::PropKey;
///
/// let plain = PropKey::encode(&ComponentId::from("input1"), "value");
/// assert_eq!(plain, PropKey::from("input1.value"));
///
/// let a = ComponentId::from(pattern_id([("type", "btn".into()), ("index", 1.into())]));
/// let b = ComponentId::from(pattern_id([("index", 1.into()), ("type", "btn".into())]));
/// assert_eq!(PropKey::encode(&a, "n_clicks"), PropKey::encode(&b, "n_clicks"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropKey {
    /// Joined `"id.property"` key for a plain identifier.
    Plain(String),
    /// Sorted field map plus property name for a pattern identifier.
    Pattern {
        /// Pattern identifier fields.
        id: PatternId,
        /// Property name.
        property: String,
    },
}

impl PropKey {
    /// Encode a component id and property name into a key.
    pub fn encode(id: &ComponentId, property: &str) -> Self {
        match id {
            ComponentId::Plain(id) => PropKey::Plain(format!("{id}.{property}")),
            ComponentId::Pattern(id) => PropKey::Pattern {
                id: id.clone(),
                property: property.to_string(),
            },
        }
    }

    /// True for pattern keys.
    pub fn is_pattern(&self) -> bool {
        matches!(self, PropKey::Pattern { .. })
    }
}

impl fmt::Display for PropKey {
    /// Plain keys render as themselves; pattern keys render the id's field
    /// values joined with `#`, then the property (`btn#0.n_clicks`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropKey::Plain(key) => f.write_str(key),
            PropKey::Pattern { id, property } => {
                let mut first = true;
                for value in id.values() {
                    if !first {
                        f.write_str("#")?;
                    }
                    write!(f, "{value}")?;
                    first = false;
                }
                write!(f, ".{property}")
            }
        }
    }
}

impl From<&str> for PropKey {
    fn from(key: &str) -> Self {
        PropKey::Plain(key.to_string())
    }
}

impl From<String> for PropKey {
    fn from(key: String) -> Self {
        PropKey::Plain(key)
    }
}

impl From<&PropKey> for PropKey {
    fn from(key: &PropKey) -> Self {
        key.clone()
    }
}
