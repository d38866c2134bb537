//! Context Reader - Lookups against the current record.
//!
//! Reads are synchronous: call them while a tree is being materialized or
//! from inside a tracked binding. Outside both, every lookup is a miss.

use crate::error::ContextError;
use crate::scope::{ContextRecord, ContextValue, current_record};

/// The full current record, if any context is active.
pub fn get_context_record() -> Option<ContextRecord> {
    current_record()
}

/// Value for `key` in the current record.
pub fn get_context(key: &str) -> Option<ContextValue> {
    current_record().and_then(|record| record.get(key).cloned())
}

/// Typed lookup; a value of another type counts as a miss.
pub fn use_context<T: Clone + 'static>(key: &str) -> Option<T> {
    get_context(key).and_then(|value| value.get::<T>())
}

/// Typed lookup falling back to `default` on a miss.
pub fn use_context_or<T: Clone + 'static>(key: &str, default: T) -> T {
    use_context(key).unwrap_or(default)
}

/// Typed lookup that reports why it missed.
pub fn expect_context<T: Clone + 'static>(key: &str) -> Result<T, ContextError> {
    let value = get_context(key).ok_or_else(|| ContextError::Missing {
        key: key.to_string(),
    })?;
    value.get::<T>().ok_or_else(|| ContextError::TypeMismatch {
        key: key.to_string(),
        expected: ContextRecord::expected_name::<T>(),
    })
}
