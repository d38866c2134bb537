//! Context-carrying invocables.
//!
//! A [`Tracked`] pairs an invocable with the record that was current when it
//! was wrapped. Calling it reinstates that record for the duration of the
//! call, so a binding re-fired by the reactive system long after
//! materialization still reads the context it was authored under.

use std::rc::Rc;

use crate::scope::{ContextRecord, current_record, with_frame};
use crate::types::{Binding, Prop};

/// An invocable stamped with a creation-time context snapshot.
pub struct Tracked<F: ?Sized> {
    snapshot: Option<ContextRecord>,
    inner: Rc<F>,
}

impl<F: ?Sized> Tracked<F> {
    /// Capture the current record alongside `inner`.
    pub fn capture(inner: Rc<F>) -> Self {
        Self {
            snapshot: current_record(),
            inner,
        }
    }

    /// The record this invocable runs under.
    pub fn snapshot(&self) -> Option<&ContextRecord> {
        self.snapshot.as_ref()
    }
}

impl<F: ?Sized> Clone for Tracked<F> {
    fn clone(&self) -> Self {
        Self {
            snapshot: self.snapshot.clone(),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R> Tracked<dyn Fn() -> R> {
    pub fn call(&self) -> R {
        let inner = &self.inner;
        with_frame(self.snapshot.clone(), || inner())
    }
}

impl<E, R> Tracked<dyn Fn(&E) -> R> {
    pub fn call_with(&self, arg: &E) -> R {
        let inner = &self.inner;
        with_frame(self.snapshot.clone(), || inner(arg))
    }
}

// =============================================================================
// Wrapping
// =============================================================================

/// Wrap a zero-argument invocable so it always runs under the current record.
pub fn track<R: 'static>(f: Rc<dyn Fn() -> R>) -> Rc<dyn Fn() -> R> {
    let tracked = Tracked::capture(f);
    Rc::new(move || tracked.call())
}

/// Wrap an argument-taking invocable (e.g. an event listener).
pub fn track_listener<E: 'static>(f: Rc<dyn Fn(&E)>) -> Rc<dyn Fn(&E)> {
    let tracked = Tracked::capture(f);
    Rc::new(move |arg: &E| tracked.call_with(arg))
}

/// Static bindings pass through; dynamic ones come back tracked.
pub fn track_binding<T: 'static>(binding: Binding<T>) -> Binding<T> {
    match binding {
        Binding::Static(value) => Binding::Static(value),
        Binding::Dynamic(f) => Binding::Dynamic(track(f)),
    }
}

/// [`track_binding`] for property assignments, including listeners.
pub fn track_prop<E: 'static>(prop: Prop<E>) -> Prop<E> {
    match prop {
        Prop::Value(binding) => Prop::Value(track_binding(binding)),
        Prop::Listener(listener) => Prop::Listener(track_listener(listener)),
    }
}
