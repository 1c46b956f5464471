//! Dispatch-time context: the concrete bindings and trigger bookkeeping the
//! host resolves for one callback firing.
//!
//! Registration happens against declarations that may contain wildcards; by
//! the time a callback fires, the host has resolved those into concrete
//! component ids. The context carries the resolved descriptor lists that run
//! parallel to the positional values, plus which input(s) triggered the
//! firing. The adapter reads it, the host builds it.

use serde::{Deserialize, Serialize};

use crate::dependency::ComponentId;
use crate::key::PropKey;

/// One concrete bound property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropBinding {
    /// Concrete component id (wildcards already resolved).
    pub id: ComponentId,
    /// Property name.
    pub property: String,
}

impl PropBinding {
    /// Bind the given component property.
    pub fn new(id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property: property.into(),
        }
    }

    /// Encoded lookup key for this binding.
    pub fn key(&self) -> PropKey {
        PropKey::encode(&self.id, &self.property)
    }
}

/// What one positional slot binds to: a single property, or every match of a
/// grouped wildcard (one level, never deeper).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    /// Single property; the slot's value is the property value.
    One(PropBinding),
    /// Grouped wildcard matches; the slot's value is a parallel JSON array.
    Many(Vec<PropBinding>),
}

impl Binding {
    /// Bind a single property.
    pub fn one(id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        Binding::One(PropBinding::new(id, property))
    }

    /// Bind a group of matched properties.
    pub fn group<I, C, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<ComponentId>,
        P: Into<String>,
    {
        Binding::Many(
            pairs
                .into_iter()
                .map(|(id, property)| PropBinding::new(id, property))
                .collect(),
        )
    }
}

/// Shape of the outputs the host expects back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputsList {
    /// One output declared bare; the host expects a bare value back.
    Single(PropBinding),
    /// Output list; the host expects a parallel list back.
    Multi(Vec<Binding>),
}

/// Everything the adapter needs to know about one firing.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackContext {
    /// Resolved input bindings, parallel to the leading positional values.
    pub inputs: Vec<Binding>,
    /// Resolved state bindings, parallel to the trailing positional values.
    pub states: Vec<Binding>,
    /// Resolved output shape.
    pub outputs: OutputsList,
    /// Keys of the input properties whose change caused this firing. Empty
    /// on the initial call.
    pub triggered: Vec<PropKey>,
}

impl CallbackContext {
    /// Start building a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Key of the first triggering input, if any.
    pub fn triggered_key(&self) -> Option<&PropKey> {
        self.triggered.first()
    }

    /// True if the given property triggered this firing.
    pub fn was_triggered(&self, key: impl Into<PropKey>) -> bool {
        let key = key.into();
        self.triggered.contains(&key)
    }
}

/// Builder for [`CallbackContext`], used by hosts and tests.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    inputs: Vec<Binding>,
    states: Vec<Binding>,
    outputs: Vec<Binding>,
    single_output: Option<PropBinding>,
    triggered: Vec<PropKey>,
}

impl ContextBuilder {
    /// Add a single input binding.
    pub fn input(mut self, id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        self.inputs.push(Binding::one(id, property));
        self
    }

    /// Add a grouped input binding.
    pub fn input_group<I, C, P>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<ComponentId>,
        P: Into<String>,
    {
        self.inputs.push(Binding::group(pairs));
        self
    }

    /// Add a single state binding.
    pub fn state(mut self, id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        self.states.push(Binding::one(id, property));
        self
    }

    /// Add a grouped state binding.
    pub fn state_group<I, C, P>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<ComponentId>,
        P: Into<String>,
    {
        self.states.push(Binding::group(pairs));
        self
    }

    /// Add one output binding to a multi-output list.
    pub fn output(mut self, id: impl Into<ComponentId>, property: impl Into<String>) -> Self {
        self.outputs.push(Binding::one(id, property));
        self
    }

    /// Add one grouped output binding to a multi-output list.
    pub fn output_group<I, C, P>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<ComponentId>,
        P: Into<String>,
    {
        self.outputs.push(Binding::group(pairs));
        self
    }

    /// Declare the one bare output; the host will expect a bare value back.
    pub fn single_output(
        mut self,
        id: impl Into<ComponentId>,
        property: impl Into<String>,
    ) -> Self {
        self.single_output = Some(PropBinding::new(id, property));
        self
    }

    /// Record a triggering input property.
    pub fn triggered(mut self, key: impl Into<PropKey>) -> Self {
        self.triggered.push(key.into());
        self
    }

    /// Finish the context.
    ///
    /// A `single_output` declaration wins over any `output`/`output_group`
    /// entries; hosts set one or the other.
    pub fn build(self) -> CallbackContext {
        let outputs = match self.single_output {
            Some(binding) => OutputsList::Single(binding),
            None => OutputsList::Multi(self.outputs),
        };
        CallbackContext {
            inputs: self.inputs,
            states: self.states,
            outputs,
            triggered: self.triggered,
        }
    }
}
