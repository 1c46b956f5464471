//! dict-dispatch: key-value callback maps for reactive app hosts
//!
//! Callback handlers normally receive their inputs and return their outputs
//! as positional lists ordered by registration. This crate adapts them to
//! key-value maps keyed by (component id, property) instead, including
//! pattern-matched (wildcard) component ids.
//!
//! # Example
//! ```ignore
//! use dict_dispatch::prelude::*;
//!
//! app.keyed_callback(
//!     DependencySpec::new()
//!         .output(Output::new("out-1", "children"))
//!         .output(Output::new("out-2", "children"))
//!         .input(Input::new("input1", "value"))
//!         .state(State::new("input2", "value")),
//!     CallbackOptions::default(),
//!     |_ctx, inputs, states| {
//!         let mut out = CallbackMap::new();
//!         out.insert("out-1.children", inputs.get("input1.value").cloned().unwrap_or_default());
//!         out.insert("out-2.children", states.get("input2.value").cloned().unwrap_or_default());
//!         Ok(out)
//!     },
//! );
//! ```

// Re-export everything from core
pub use dict_dispatch_core::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use dict_dispatch_core::prelude::*;
}
