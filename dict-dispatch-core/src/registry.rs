//! Registration seam between this library and the black-box host.
//!
//! The host framework owns dispatch: it tracks property changes, decides
//! when a callback fires, and applies the values handed back. All it exposes
//! here is [`HostRegistrar::register`]. The [`KeyedCallbacks`] extension
//! trait is the whole plugin surface: it turns a map-style handler into the
//! positional [`HostCallback`] the host knows how to call, so the host never
//! learns that maps are involved.

use serde_json::Value;

use crate::adapter::{CallbackOptions, CallbackResponse, DictCallback};
use crate::context::CallbackContext;
use crate::dependency::{Dependency, DependencySpec};
use crate::error::CallbackError;
use crate::map::CallbackMap;

/// Options forwarded to the host at registration, untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterOptions {
    /// Suppress the firing that happens when outputs first enter the page.
    /// `None` defers to the host's app-level default.
    pub prevent_initial_call: Option<bool>,
}

/// The positional callback shape the host dispatches.
pub type HostCallback =
    Box<dyn Fn(&CallbackContext, Vec<Value>) -> Result<CallbackResponse, CallbackError> + Send + Sync>;

/// What a host must offer for callbacks to be registered against it.
pub trait HostRegistrar {
    /// Register one callback over the given dependency set.
    fn register(&mut self, spec: DependencySpec, options: RegisterOptions, callback: HostCallback);
}

/// Extension trait adding map-style callback registration to every host.
///
/// ```ignore
/// use dict_dispatch_core::prelude::*;
///
/// app.keyed_callback(
///     DependencySpec::new()
///         .output(Output::new("out-1", "children"))
///         .input(Input::new("input1", "value"))
///         .state(State::new("input2", "value")),
///     CallbackOptions::default(),
///     |_ctx, inputs, states| {
///         let mut out = CallbackMap::new();
///         out.insert("out-1.children", inputs.get("input1.value").cloned().unwrap_or_default());
///         Ok(out)
///     },
/// );
/// ```
pub trait KeyedCallbacks: HostRegistrar {
    /// Register a map-style handler over an already-built dependency spec.
    fn keyed_callback<F>(&mut self, spec: DependencySpec, options: CallbackOptions, handler: F)
    where
        F: Fn(&CallbackContext, &CallbackMap, &CallbackMap) -> Result<CallbackMap, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        let register_options = RegisterOptions {
            prevent_initial_call: options.prevent_initial_call,
        };
        tracing::debug!(
            outputs = spec.outputs.len(),
            inputs = spec.inputs.len(),
            states = spec.states.len(),
            strict = options.strict,
            allow_missing = options.allow_missing,
            "registering keyed callback"
        );
        let callback = DictCallback::new(options, handler);
        self.register(
            spec,
            register_options,
            Box::new(move |ctx, values| callback.invoke(ctx, values)),
        );
    }

    /// Register a map-style handler over an interleaved dependency list.
    fn keyed_callback_from<D, F>(&mut self, deps: D, options: CallbackOptions, handler: F)
    where
        D: IntoIterator<Item = Dependency>,
        F: Fn(&CallbackContext, &CallbackMap, &CallbackMap) -> Result<CallbackMap, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.keyed_callback(DependencySpec::normalize(deps), options, handler);
    }
}

impl<T: HostRegistrar + ?Sized> KeyedCallbacks for T {}
