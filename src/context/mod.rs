//! Context nodes and context lookups.
//!
//! - [`context`] / [`ContextNode`] - Publish a mapping to a subtree
//! - [`get_context`] / [`use_context`] - Read from the nearest enclosing mapping
//!
//! # Example
//!
//! ```ignore
//! use spark_context::{context, context_map, use_context, Accessor, Child};
//!
//! let theme = signal("dark".to_string());
//!
//! let label = Child::component(|| {
//!     let theme = use_context::<Accessor<String>>("theme").unwrap_or_default();
//!     // hand `theme` to a dynamic binding; it keeps this record when re-run
//!     # Child::empty()
//! });
//!
//! let root = context(context_map! { "theme" => Accessor::Signal(theme) }, [label]);
//! ```

mod node;
mod reader;

pub use node::*;
pub use reader::*;
