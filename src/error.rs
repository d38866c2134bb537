use thiserror::Error;

/// Failure of a typed context lookup.
///
/// Plain lookups never fail: a miss is `None`. This error only comes out of
/// [`expect_context`](crate::context::expect_context), for callers that want
/// to tell a missing key apart from a value of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("no context value for key `{key}`")]
    Missing { key: String },
    #[error("context value for key `{key}` is not a `{expected}`")]
    TypeMismatch { key: String, expected: &'static str },
}
