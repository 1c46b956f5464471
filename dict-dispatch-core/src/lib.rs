//! Core types and translators for dict-dispatch
//!
//! This crate lets a callback handler registered against a reactive app host
//! take its inputs and produce its outputs as key-value maps — keyed by a
//! (component id, property) pair — instead of positional value lists. The
//! host's dispatcher stays a black box behind one registration trait.
//!
//! # Core Concepts
//!
//! - **Dependency**: an [`Output`]/[`Input`]/[`State`] declaration over a
//!   plain or pattern-matching [`ComponentId`]
//! - **PropKey**: the canonical hashable key for one component property
//! - **CallbackMap**: the keyed view handlers read from and write to
//! - **CallbackContext**: the concrete bindings the host resolved for one
//!   firing
//! - **DictCallback**: the adapter translating positional values to maps and
//!   back around the handler call
//! - **HostRegistrar / KeyedCallbacks**: the registration seam and the
//!   extension trait that plugs map-style handlers into it
//!
//! # Basic Example
//!
//! ```ignore
//! use dict_dispatch_core::prelude::*;
//!
//! app.keyed_callback(
//!     DependencySpec::new()
//!         .output(Output::new("celsius-display", "children"))
//!         .input(Input::new("celsius", "value")),
//!     CallbackOptions::default(),
//!     |_ctx, inputs, _states| {
//!         let mut out = CallbackMap::new();
//!         out.insert("celsius-display.children", inputs.get("celsius.value").cloned().unwrap_or_default());
//!         Ok(out)
//!     },
//! );
//! ```
//!
//! # Pattern Matching
//!
//! Pattern identifiers are field maps; wildcard fields ([`Wildcard::Match`],
//! [`Wildcard::All`], [`Wildcard::AllSmaller`]) bind to concrete components
//! at dispatch time. Handlers discover what matched through
//! [`CallbackMap::pattern_keys`] and address entries with
//! [`CallbackMap::pattern_get`]/[`CallbackMap::pattern_set`]. A grouped
//! wildcard slot arrives as one JSON array and is flattened one level into
//! the map.

pub mod adapter;
pub mod context;
pub mod dependency;
pub mod error;
pub mod key;
pub mod map;
pub mod registry;
pub mod testing;
pub mod translate;

// Dependency exports
pub use dependency::{
    pattern_id, ComponentId, Dependency, DependencySpec, IdFragment, Input, Output, PatternId,
    State, Wildcard,
};

// Key and map exports
pub use key::PropKey;
pub use map::{CallbackMap, Update};

// Context exports
pub use context::{Binding, CallbackContext, ContextBuilder, OutputsList, PropBinding};

// Translator exports
pub use translate::{binding_keys, map_to_values, output_keys, values_to_map, OutputValue};

// Adapter exports
pub use adapter::{CallbackOptions, CallbackResponse, DictCallback, DictHandler};

// Registration exports
pub use error::CallbackError;
pub use registry::{HostCallback, HostRegistrar, KeyedCallbacks, RegisterOptions};

// Testing exports
pub use testing::TestHost;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapter::{CallbackOptions, CallbackResponse, DictCallback};
    pub use crate::context::{Binding, CallbackContext, OutputsList, PropBinding};
    pub use crate::dependency::{
        pattern_id, ComponentId, Dependency, DependencySpec, IdFragment, Input, Output, PatternId,
        State, Wildcard,
    };
    pub use crate::error::CallbackError;
    pub use crate::key::PropKey;
    pub use crate::map::{CallbackMap, Update};
    pub use crate::registry::{HostRegistrar, KeyedCallbacks, RegisterOptions};
    pub use crate::translate::OutputValue;
}
