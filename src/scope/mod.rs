//! Scope Registry - current context record and its save/restore primitive.
//!
//! - [`ContextRecord`] / [`ContextValue`]: what a subtree can see
//! - [`current_record`]: read the record of the current frame
//! - [`with_frame`]: run a body under another record, restoring afterwards

mod record;
mod registry;

pub use record::*;
pub use registry::*;
