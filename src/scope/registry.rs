//! Scope Registry - The current tracking frame.
//!
//! One frame is current per thread. It is only ever replaced by
//! [`with_frame`], which reinstates the saved frame when its body returns or
//! unwinds, so the frames form a stack encoded in the call stack.

use std::cell::RefCell;

use super::record::ContextRecord;

// =============================================================================
// Registry State
// =============================================================================

/// Unit of save/restore: the record visible to code running under it.
#[derive(Debug, Default)]
struct Frame {
    record: Option<ContextRecord>,
}

impl Frame {
    fn new(record: Option<ContextRecord>) -> Self {
        Self { record }
    }
}

thread_local! {
    /// The current frame. `record: None` at the root.
    static CURRENT_FRAME: RefCell<Frame> = RefCell::new(Frame::default());
}

// =============================================================================
// Reads
// =============================================================================

/// Record of the current frame, or `None` outside any context.
pub fn current_record() -> Option<ContextRecord> {
    CURRENT_FRAME.with(|frame| frame.borrow().record.clone())
}

// =============================================================================
// Scoped acquisition
// =============================================================================

/// Reinstates the saved frame on drop, including during unwinding.
struct FrameGuard {
    saved: Option<Frame>,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            CURRENT_FRAME.with(|frame| {
                *frame.borrow_mut() = saved;
            });
            tracing::trace!("context frame restored");
        }
    }
}

fn install(candidate: Option<ContextRecord>) -> FrameGuard {
    let saved = CURRENT_FRAME.with(|frame| frame.replace(Frame::new(candidate)));
    FrameGuard { saved: Some(saved) }
}

/// Run `body` with a new frame wrapping `candidate` installed.
///
/// The previous frame is reinstated after `body` returns or panics, and the
/// result (or panic) is passed through unchanged. Nesting and re-entrancy are
/// fine: every call saves and restores independently.
pub fn with_frame<R>(candidate: Option<ContextRecord>, body: impl FnOnce() -> R) -> R {
    tracing::trace!(
        keys = candidate.as_ref().map_or(0, ContextRecord::len),
        "context frame installed"
    );
    let _guard = install(candidate);
    body()
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Drop back to the root frame (for testing).
pub fn reset_scope() {
    CURRENT_FRAME.with(|frame| {
        *frame.borrow_mut() = Frame::default();
    });
}
