//! The adapter that lets a map-style handler stand in for the positional
//! handler shape the host dispatches.
//!
//! A wrapped handler receives its inputs and states as [`CallbackMap`]s and
//! returns its outputs as one, keyed by (component id, property). The
//! adapter translates in both directions around the call:
//!
//! 1. Split the positional values at the input count; translate each half.
//! 2. Call the handler. [`CallbackError::PreventUpdate`] skips the firing.
//! 3. Translate the returned map back into positional output values,
//!    substituting [`Update::NoUpdate`](crate::map::Update) for omitted keys
//!    unless `allow_missing` is off.
//! 4. In strict mode, reject result keys that are not declared outputs.
//! 5. Unwrap the bare value when the host declared a single bare output.

use std::collections::HashSet;

use serde_json::Value;

use crate::context::{CallbackContext, OutputsList};
use crate::error::CallbackError;
use crate::map::{CallbackMap, Update};
use crate::translate::{map_to_values, output_keys, update_for, values_to_map, OutputValue};

/// Per-callback behavior switches.
///
/// `strict` rejects result keys that are not declared outputs.
/// `allow_missing` (on by default) turns omitted output keys into no-updates
/// instead of errors. `prevent_initial_call` is forwarded to the host
/// untouched at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackOptions {
    /// Reject undeclared keys in the handler's result map.
    pub strict: bool,
    /// Treat omitted output keys as no-updates rather than errors.
    pub allow_missing: bool,
    /// Host-level initial-call suppression, forwarded as-is.
    pub prevent_initial_call: Option<bool>,
}

impl Default for CallbackOptions {
    fn default() -> Self {
        Self {
            strict: false,
            allow_missing: true,
            prevent_initial_call: None,
        }
    }
}

impl CallbackOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set missing-key tolerance.
    pub fn allow_missing(mut self, allow_missing: bool) -> Self {
        self.allow_missing = allow_missing;
        self
    }

    /// Set initial-call suppression.
    pub fn prevent_initial_call(mut self, prevent: bool) -> Self {
        self.prevent_initial_call = Some(prevent);
        self
    }
}

/// Boxed map-style handler.
///
/// The context comes first so handlers can inspect `triggered` and the
/// resolved bindings; most handlers ignore it.
pub type DictHandler = Box<
    dyn Fn(&CallbackContext, &CallbackMap, &CallbackMap) -> Result<CallbackMap, CallbackError>
        + Send
        + Sync,
>;

/// What the adapter hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackResponse {
    /// Bare value for a bare single output.
    Single(Update),
    /// Positional values for an output list.
    Multi(Vec<OutputValue>),
}

/// A map-style handler plus its options, invokable in the host's positional
/// shape.
pub struct DictCallback {
    options: CallbackOptions,
    handler: DictHandler,
}

impl std::fmt::Debug for DictCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictCallback")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl DictCallback {
    /// Wrap a map-style handler.
    pub fn new<F>(options: CallbackOptions, handler: F) -> Self
    where
        F: Fn(&CallbackContext, &CallbackMap, &CallbackMap) -> Result<CallbackMap, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            options,
            handler: Box::new(handler),
        }
    }

    /// This callback's options.
    pub fn options(&self) -> &CallbackOptions {
        &self.options
    }

    /// Run one firing: positional values in, positional values out.
    pub fn invoke(
        &self,
        ctx: &CallbackContext,
        values: Vec<Value>,
    ) -> Result<CallbackResponse, CallbackError> {
        let expected = ctx.inputs.len() + ctx.states.len();
        if values.len() != expected {
            return Err(CallbackError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }

        let (input_values, state_values) = values.split_at(ctx.inputs.len());
        let inputs = values_to_map(input_values, &ctx.inputs)?;
        let states = values_to_map(state_values, &ctx.states)?;

        tracing::debug!(
            inputs = inputs.len(),
            states = states.len(),
            triggered = ctx.triggered.len(),
            "invoking keyed callback"
        );

        let result = match (self.handler)(ctx, &inputs, &states) {
            Ok(result) => result,
            Err(err) => {
                if err.is_prevent_update() {
                    tracing::debug!("callback prevented update");
                }
                return Err(err);
            }
        };

        // Translate before the strict sweep so a missing key under
        // allow_missing=false outranks an unexpected one.
        let response = match &ctx.outputs {
            OutputsList::Single(prop) => {
                CallbackResponse::Single(update_for(&result, prop, self.options.allow_missing)?)
            }
            OutputsList::Multi(_) => CallbackResponse::Multi(map_to_values(
                &result,
                &ctx.outputs,
                self.options.allow_missing,
            )?),
        };

        if self.options.strict {
            let declared: HashSet<_> = output_keys(&ctx.outputs).into_iter().collect();
            let mut unexpected: Vec<String> = result
                .keys()
                .filter(|key| !declared.contains(*key))
                .map(|key| key.to_string())
                .collect();
            if !unexpected.is_empty() {
                unexpected.sort();
                return Err(CallbackError::UnexpectedKeys(unexpected));
            }
        }

        Ok(response)
    }
}
