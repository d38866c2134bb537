//! # spark-context
//!
//! Lexically-scoped context for reactive component trees.
//!
//! An ancestor publishes named values with a context node; any descendant
//! reads them without prop threading. Dynamic bindings created during
//! materialization keep reading the record they were created under, even
//! when the reactive system re-runs them much later.
//!
//! ## Architecture
//!
//! ```text
//! context node ─push→ Scope Registry ←read─ descendant components
//!                          │
//!          snapshot at creation
//!                          ▼
//! dynamic binding ──RenderApi (ContextApi)──→ engine ──re-fires──→ Tracked::call
//!                                                     (reinstates the snapshot)
//! ```
//!
//! ## Modules
//!
//! - [`scope`] - Current record, `with_frame` save/restore
//! - [`intercept`] - Capture-and-reinstate wrapper, engine extension points
//! - [`context`] - Context nodes, child resolution, lookups
//! - `dom` - Reference engine built on spark-signals effects (feature `dom`)
//! - [`types`] - Accessors, bindings, insertable content

pub mod context;
#[cfg(feature = "dom")]
pub mod dom;
pub mod error;
pub mod intercept;
pub mod scope;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::ContextError;

pub use scope::{ContextRecord, ContextValue, current_record, reset_scope, with_frame};

pub use intercept::{
    ContextApi, RenderApi, Tracked, enable_context, track, track_binding, track_listener,
    track_prop,
};

pub use context::{
    Child, Component, ContextNode, context, expect_context, get_context, get_context_record,
    resolve_child, resolve_children, use_context, use_context_or,
};

#[cfg(feature = "dom")]
pub use dom::{Dom, DomNode, Event, Part, context_api, dynamic, h, h_props, mount};
