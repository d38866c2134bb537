//! Reference rendering engine.
//!
//! A small retained-mode tree that implements [`RenderApi`](crate::intercept::RenderApi)
//! on top of `spark-signals` effects. Enough to materialize component trees,
//! keep dynamic parts live, dispatch events, and serialize to HTML.
//!
//! - [`DomNode`] - Node handle (element, text, region)
//! - [`Dom`] - The engine
//! - [`h`] / [`h_props`] - Element builder going through the extension points
//! - [`context_api`] - `Dom` composed with the binding interceptor

mod builder;
mod engine;
mod node;

pub use builder::*;
pub use engine::*;
pub use node::*;
