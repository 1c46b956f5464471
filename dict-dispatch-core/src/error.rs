//! Error type shared by translation, adaptation, and handlers.

use thiserror::Error;

use crate::key::PropKey;

/// Everything that can go wrong between the host handing over positional
/// values and getting positional values back.
///
/// [`CallbackError::PreventUpdate`] is not a failure: it is the
/// whole-callback skip signal a handler returns to leave every output
/// untouched, and the host is expected to treat it as such.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// Positional value count does not match the binding count.
    #[error("expected {expected} positional values, got {actual}")]
    LengthMismatch {
        /// Bindings the context declared.
        expected: usize,
        /// Values actually supplied.
        actual: usize,
    },

    /// A grouped binding was handed something other than a JSON array.
    #[error("expected a JSON array of {expected} values for a grouped binding")]
    GroupedValue {
        /// Size of the grouped binding.
        expected: usize,
    },

    /// The handler's result map lacks an output key and missing keys are not
    /// allowed.
    #[error("callback result is missing output key `{0}`")]
    MissingKey(PropKey),

    /// Strict mode: the handler's result map contains keys that are not
    /// declared outputs.
    #[error("callback result contains unexpected output keys: {}", .0.join(", "))]
    UnexpectedKeys(Vec<String>),

    /// Skip this firing entirely; no output is updated.
    #[error("update prevented")]
    PreventUpdate,

    /// Handler business logic failed.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl CallbackError {
    /// True for the whole-callback skip signal.
    pub fn is_prevent_update(&self) -> bool {
        matches!(self, CallbackError::PreventUpdate)
    }
}
