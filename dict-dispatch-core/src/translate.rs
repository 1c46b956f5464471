//! Translators between positional value lists and keyed maps.
//!
//! Both directions are single-pass zips over the binding descriptors. Grouped
//! wildcard bindings flatten exactly one level: a group's positional value is
//! a JSON array parallel to the group's bindings, and its entries land in the
//! map individually.

use serde_json::Value;

use crate::context::{Binding, OutputsList, PropBinding};
use crate::error::CallbackError;
use crate::key::PropKey;
use crate::map::{CallbackMap, Update};

/// Translated value for one output slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputValue {
    /// Value for a single binding.
    One(Update),
    /// Values for a grouped binding, parallel to its matches.
    Many(Vec<Update>),
}

/// Zip positional values with their bindings into a keyed map.
///
/// Fails if the value list and binding list differ in length, if a grouped
/// binding's value is not a JSON array, or if that array's length differs
/// from the group's.
pub fn values_to_map(values: &[Value], bindings: &[Binding]) -> Result<CallbackMap, CallbackError> {
    if values.len() != bindings.len() {
        return Err(CallbackError::LengthMismatch {
            expected: bindings.len(),
            actual: values.len(),
        });
    }

    let mut map = CallbackMap::with_capacity(values.len());
    for (binding, value) in bindings.iter().zip(values) {
        match binding {
            Binding::One(prop) => {
                map.insert(prop.key(), value.clone());
            }
            Binding::Many(group) => {
                let items = match value {
                    Value::Array(items) => items,
                    _ => {
                        return Err(CallbackError::GroupedValue {
                            expected: group.len(),
                        })
                    }
                };
                if items.len() != group.len() {
                    return Err(CallbackError::LengthMismatch {
                        expected: group.len(),
                        actual: items.len(),
                    });
                }
                for (prop, item) in group.iter().zip(items) {
                    map.insert(prop.key(), item.clone());
                }
            }
        }
    }
    Ok(map)
}

/// Read the update for a single bound property back out of a map.
///
/// A missing key becomes [`Update::NoUpdate`] when `allow_missing` is set,
/// and a [`CallbackError::MissingKey`] otherwise.
pub fn update_for(
    map: &CallbackMap,
    prop: &PropBinding,
    allow_missing: bool,
) -> Result<Update, CallbackError> {
    let key = prop.key();
    match map.get(&key) {
        Some(value) => Ok(Update::Value(value.clone())),
        None if allow_missing => Ok(Update::NoUpdate),
        None => Err(CallbackError::MissingKey(key)),
    }
}

/// Read every output value back out of a map, in output order.
pub fn map_to_values(
    map: &CallbackMap,
    outputs: &OutputsList,
    allow_missing: bool,
) -> Result<Vec<OutputValue>, CallbackError> {
    match outputs {
        OutputsList::Single(prop) => {
            Ok(vec![OutputValue::One(update_for(map, prop, allow_missing)?)])
        }
        OutputsList::Multi(bindings) => bindings
            .iter()
            .map(|binding| match binding {
                Binding::One(prop) => Ok(OutputValue::One(update_for(map, prop, allow_missing)?)),
                Binding::Many(group) => Ok(OutputValue::Many(
                    group
                        .iter()
                        .map(|prop| update_for(map, prop, allow_missing))
                        .collect::<Result<_, _>>()?,
                )),
            })
            .collect(),
    }
}

/// Encoded keys of a binding list, groups flattened one level.
pub fn binding_keys(bindings: &[Binding]) -> Vec<PropKey> {
    let mut keys = Vec::new();
    for binding in bindings {
        match binding {
            Binding::One(prop) => keys.push(prop.key()),
            Binding::Many(group) => keys.extend(group.iter().map(PropBinding::key)),
        }
    }
    keys
}

/// Encoded keys of an outputs list.
pub fn output_keys(outputs: &OutputsList) -> Vec<PropKey> {
    match outputs {
        OutputsList::Single(prop) => vec![prop.key()],
        OutputsList::Multi(bindings) => binding_keys(bindings),
    }
}
