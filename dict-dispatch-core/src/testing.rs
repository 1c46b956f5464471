//! Test utilities: a simulated host that records registrations and fires
//! callbacks on demand.
//!
//! [`TestHost`] is a stand-in for the real dispatcher in tests and demos. It
//! implements [`HostRegistrar`] by recording each registration, and exposes
//! `fire` to invoke a recorded callback with a context and positional
//! values. `static_context` builds the context straight from a wildcard-free
//! spec, which covers plain-id callbacks without any hand-assembly.
//!
//! Helpers here panic on misuse (out-of-range indexes, wildcard specs where
//! concrete ones are required); that is the right trade for test code.

use serde_json::Value;

use crate::adapter::CallbackResponse;
use crate::context::{Binding, CallbackContext, OutputsList, PropBinding};
use crate::dependency::{ComponentId, DependencySpec};
use crate::error::CallbackError;
use crate::registry::{HostCallback, HostRegistrar, RegisterOptions};

/// One recorded registration.
pub struct RegisteredCallback {
    /// Dependency set the callback was registered with.
    pub spec: DependencySpec,
    /// Options forwarded to the host.
    pub options: RegisterOptions,
    callback: HostCallback,
}

/// Simulated host: records registrations, fires them on demand.
#[derive(Default)]
pub struct TestHost {
    callbacks: Vec<RegisteredCallback>,
}

impl HostRegistrar for TestHost {
    fn register(&mut self, spec: DependencySpec, options: RegisterOptions, callback: HostCallback) {
        self.callbacks.push(RegisteredCallback {
            spec,
            options,
            callback,
        });
    }
}

impl TestHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded registrations.
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Spec of the `index`-th registration.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn spec(&self, index: usize) -> &DependencySpec {
        &self.callbacks[index].spec
    }

    /// Forwarded options of the `index`-th registration.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn options(&self, index: usize) -> &RegisterOptions {
        &self.callbacks[index].options
    }

    /// Fire the `index`-th callback with the given context and values.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn fire(
        &self,
        index: usize,
        ctx: &CallbackContext,
        values: Vec<Value>,
    ) -> Result<CallbackResponse, CallbackError> {
        (self.callbacks[index].callback)(ctx, values)
    }

    /// Build a dispatch context straight from the `index`-th spec.
    ///
    /// Each declared dependency becomes a single concrete binding with its
    /// registration id; the outputs shape is `Single` exactly when the spec
    /// declared one output. `triggered` is left empty.
    ///
    /// # Panics
    /// Panics if `index` is out of range or the spec contains wildcards —
    /// wildcard bindings depend on what matched, which only a real dispatch
    /// knows.
    pub fn static_context(&self, index: usize) -> CallbackContext {
        let spec = &self.callbacks[index].spec;
        let wildcard = spec
            .outputs
            .iter()
            .map(|d| &d.id)
            .chain(spec.inputs.iter().map(|d| &d.id))
            .chain(spec.states.iter().map(|d| &d.id))
            .any(|id| id.has_wildcard());
        assert!(
            !wildcard,
            "static_context requires a wildcard-free spec; build the context by hand"
        );

        let bind =
            |id: &ComponentId, property: &str| Binding::One(PropBinding::new(id.clone(), property));
        let outputs = if spec.is_single_output() {
            OutputsList::Single(PropBinding::new(
                spec.outputs[0].id.clone(),
                spec.outputs[0].property.clone(),
            ))
        } else {
            OutputsList::Multi(
                spec.outputs
                    .iter()
                    .map(|d| bind(&d.id, &d.property))
                    .collect(),
            )
        };

        CallbackContext {
            inputs: spec.inputs.iter().map(|d| bind(&d.id, &d.property)).collect(),
            states: spec.states.iter().map(|d| bind(&d.id, &d.property)).collect(),
            outputs,
            triggered: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::CallbackOptions;
    use crate::dependency::{pattern_id, Input, Output, State, Wildcard};
    use crate::map::{CallbackMap, Update};
    use crate::registry::KeyedCallbacks;
    use serde_json::json;

    #[test]
    fn test_registration_is_recorded() {
        let mut host = TestHost::new();
        host.keyed_callback(
            DependencySpec::new()
                .output(Output::new("out", "children"))
                .input(Input::new("in", "value")),
            CallbackOptions::new().prevent_initial_call(true),
            |_, _, _| Ok(CallbackMap::new()),
        );

        assert_eq!(host.callback_count(), 1);
        assert_eq!(host.spec(0).inputs.len(), 1);
        assert_eq!(host.options(0).prevent_initial_call, Some(true));
    }

    #[test]
    fn test_static_context_mirrors_spec() {
        let mut host = TestHost::new();
        host.keyed_callback(
            DependencySpec::new()
                .output(Output::new("out", "children"))
                .input(Input::new("in", "value"))
                .state(State::new("s", "value")),
            CallbackOptions::default(),
            |_, inputs, _| {
                let mut out = CallbackMap::new();
                out.insert("out.children", inputs.get("in.value").cloned().unwrap_or(json!(null)));
                Ok(out)
            },
        );

        let ctx = host.static_context(0);
        assert_eq!(ctx.inputs.len(), 1);
        assert_eq!(ctx.states.len(), 1);
        assert!(matches!(ctx.outputs, OutputsList::Single(_)));

        let response = host.fire(0, &ctx, vec![json!("ping"), json!(null)]).unwrap();
        assert_eq!(response, CallbackResponse::Single(Update::Value(json!("ping"))));
    }

    #[test]
    #[should_panic(expected = "wildcard-free")]
    fn test_static_context_rejects_wildcards() {
        let mut host = TestHost::new();
        host.keyed_callback(
            DependencySpec::new()
                .output(Output::new("out", "children"))
                .input(Input::new(
                    pattern_id([("type", "dd".into()), ("index", Wildcard::All.into())]),
                    "value",
                )),
            CallbackOptions::default(),
            |_, _, _| Ok(CallbackMap::new()),
        );
        host.static_context(0);
    }
}
