//! Binding Interceptor - Creation-time context for dynamic bindings.
//!
//! Dynamic values handed to the rendering extension points are re-invoked
//! by the reactive system whenever it sees fit. Left alone they would run
//! under whatever record happens to be current at that point; wrapped, they
//! run under the record that was current when they were created.
//!
//! - [`Tracked`] / [`track`]: the capture-and-reinstate wrapper
//! - [`RenderApi`]: the two extension points an engine exposes
//! - [`enable_context`]: compose an engine with the interceptor at startup

mod api;
mod tracked;

pub use api::*;
pub use tracked::*;
