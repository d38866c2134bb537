//! Shared value types - accessors, bindings, insertable content.
//!
//! These types describe what flows across the boundary between the core and
//! a rendering engine. A value is *dynamic* exactly when it is invocable,
//! which here means the `Dynamic` / `Listener` variants.

use std::fmt;
use std::rc::Rc;

use spark_signals::Signal;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function stored by engines (e.g. an effect's stop function).
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Accessor - Reactive context value
// =============================================================================

/// Read handle for a value published through a context node.
///
/// Descendants look the accessor up once while materializing and call
/// [`Accessor::get`] from their dynamic bindings. The record holding it never
/// changes identity, so a signal write reaches every binding that captured
/// the record without re-rendering the subtree.
#[derive(Clone)]
pub enum Accessor<T: Clone + PartialEq + 'static> {
    /// Fixed for the lifetime of the record.
    Static(T),
    /// Read through the signal, so bindings track it.
    Signal(Signal<T>),
    /// Derived value, recomputed on every read.
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> Accessor<T> {
    /// Build a getter accessor from a closure.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        Accessor::Getter(Rc::new(f))
    }

    /// Current value. Inside an effect this subscribes to a signal source.
    pub fn get(&self) -> T {
        match self {
            Accessor::Static(v) => v.clone(),
            Accessor::Signal(s) => s.get(),
            Accessor::Getter(f) => f(),
        }
    }

    /// Map into a derived getter accessor.
    pub fn map<U: Clone + PartialEq + 'static>(&self, f: impl Fn(T) -> U + 'static) -> Accessor<U> {
        let source = self.clone();
        Accessor::getter(move || f(source.get()))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Accessor<T> {
    fn default() -> Self {
        Accessor::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for Accessor<T> {
    fn from(value: T) -> Self {
        Accessor::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for Accessor<T> {
    fn from(signal: Signal<T>) -> Self {
        Accessor::Signal(signal)
    }
}

impl<T: Clone + PartialEq + 'static> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Static(_) => f.write_str("Accessor::Static"),
            Accessor::Signal(_) => f.write_str("Accessor::Signal"),
            Accessor::Getter(_) => f.write_str("Accessor::Getter"),
        }
    }
}

// =============================================================================
// Binding - Static or dynamic value for an extension point
// =============================================================================

/// A value handed to an extension point.
///
/// `Dynamic` is re-invoked by the engine whenever its reactive dependencies
/// change, possibly long after the tree was materialized.
pub enum Binding<T> {
    /// Plain value, bypasses context capture.
    Static(T),
    /// Re-evaluatable value.
    Dynamic(Rc<dyn Fn() -> T>),
}

impl<T> Binding<T> {
    /// Build a dynamic binding from a closure.
    pub fn dynamic(f: impl Fn() -> T + 'static) -> Self {
        Binding::Dynamic(Rc::new(f))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Binding::Dynamic(_))
    }
}

impl<T: Clone> Binding<T> {
    /// Evaluate the binding once.
    pub fn get(&self) -> T {
        match self {
            Binding::Static(v) => v.clone(),
            Binding::Dynamic(f) => f(),
        }
    }
}

impl<T: Clone> Clone for Binding<T> {
    fn clone(&self) -> Self {
        match self {
            Binding::Static(v) => Binding::Static(v.clone()),
            Binding::Dynamic(f) => Binding::Dynamic(Rc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Static(_) => f.write_str("Binding::Static"),
            Binding::Dynamic(_) => f.write_str("Binding::Dynamic"),
        }
    }
}

// =============================================================================
// Content - What child insertion inserts
// =============================================================================

/// Output of a child insertion, in terms of the engine's node type `N`.
#[derive(Clone, Debug, PartialEq)]
pub enum Content<N> {
    Empty,
    Text(String),
    Node(N),
    Nodes(Vec<N>),
}

impl<N> Default for Content<N> {
    fn default() -> Self {
        Content::Empty
    }
}

impl<N> From<String> for Content<N> {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl<N> From<&str> for Content<N> {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl<N> From<Vec<N>> for Content<N> {
    fn from(nodes: Vec<N>) -> Self {
        Content::Nodes(nodes)
    }
}

macro_rules! content_from_display {
    ($($t:ty),*) => {
        $(
            impl<N> From<$t> for Content<N> {
                fn from(value: $t) -> Self {
                    Content::Text(value.to_string())
                }
            }
        )*
    };
}

content_from_display!(i32, i64, u32, u64, usize, f32, f64, bool, char);

// =============================================================================
// Prop - What property assignment assigns
// =============================================================================

/// A property assignment: either a value binding or an event listener.
///
/// Listeners are invocables with a trailing argument (the event), so the
/// interceptor treats them as dynamic values too.
pub enum Prop<E> {
    Value(Binding<String>),
    Listener(Rc<dyn Fn(&E)>),
}

impl<E> Prop<E> {
    pub fn listener(f: impl Fn(&E) + 'static) -> Self {
        Prop::Listener(Rc::new(f))
    }

    pub fn dynamic(f: impl Fn() -> String + 'static) -> Self {
        Prop::Value(Binding::dynamic(f))
    }
}

impl<E> From<&str> for Prop<E> {
    fn from(value: &str) -> Self {
        Prop::Value(Binding::Static(value.to_string()))
    }
}

impl<E> From<String> for Prop<E> {
    fn from(value: String) -> Self {
        Prop::Value(Binding::Static(value))
    }
}

impl<E> Clone for Prop<E> {
    fn clone(&self) -> Self {
        match self {
            Prop::Value(b) => Prop::Value(b.clone()),
            Prop::Listener(l) => Prop::Listener(Rc::clone(l)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_accessor_variants() {
        let count = signal(3);

        let fixed: Accessor<i32> = 7.into();
        let live: Accessor<i32> = count.clone().into();
        let doubled = live.map(|v| v * 2);

        assert_eq!(fixed.get(), 7);
        assert_eq!(live.get(), 3);
        assert_eq!(doubled.get(), 6);

        count.set(5);
        assert_eq!(live.get(), 5);
        assert_eq!(doubled.get(), 10);
    }

    #[test]
    fn test_binding_dynamic_flag() {
        let fixed: Binding<String> = Binding::Static("a".into());
        let live = Binding::dynamic(|| "b".to_string());

        assert!(!fixed.is_dynamic());
        assert!(live.is_dynamic());
        assert_eq!(live.get(), "b");
    }

    #[test]
    fn test_content_from_numbers() {
        let c: Content<()> = 42.into();
        assert_eq!(c, Content::Text("42".to_string()));
    }
}
