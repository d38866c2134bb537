//! Rendering extension points and their context-aware composition.
//!
//! An engine exposes two extension points through [`RenderApi`]: child
//! insertion and property assignment. [`enable_context`] composes an engine
//! with the interceptor once at startup; every dynamic value that passes
//! through the returned [`ContextApi`] is stamped with the record current at
//! that moment before the engine sees it.

use std::rc::Rc;

use crate::types::{Binding, Content, Prop};

use super::tracked::{track_binding, track_prop};

/// The two extension points the core hooks.
///
/// Dynamic values (`Binding::Dynamic`, `Prop::Listener`) are plain
/// invocables the engine may re-invoke at any later time.
pub trait RenderApi {
    /// The engine's node handle.
    type Node: Clone + 'static;
    /// Argument passed to event listeners.
    type Event: 'static;

    /// Insert content into `parent`, before `marker` when given.
    fn insert(
        &self,
        parent: &Self::Node,
        value: Binding<Content<Self::Node>>,
        marker: Option<&Self::Node>,
    );

    /// Assign property `name` on `target`.
    fn property(&self, target: &Self::Node, name: &str, value: Prop<Self::Event>);
}

impl<A: RenderApi + ?Sized> RenderApi for Rc<A> {
    type Node = A::Node;
    type Event = A::Event;

    fn insert(
        &self,
        parent: &Self::Node,
        value: Binding<Content<Self::Node>>,
        marker: Option<&Self::Node>,
    ) {
        (**self).insert(parent, value, marker)
    }

    fn property(&self, target: &Self::Node, name: &str, value: Prop<Self::Event>) {
        (**self).property(target, name, value)
    }
}

impl<A: RenderApi + ?Sized> RenderApi for &A {
    type Node = A::Node;
    type Event = A::Event;

    fn insert(
        &self,
        parent: &Self::Node,
        value: Binding<Content<Self::Node>>,
        marker: Option<&Self::Node>,
    ) {
        (**self).insert(parent, value, marker)
    }

    fn property(&self, target: &Self::Node, name: &str, value: Prop<Self::Event>) {
        (**self).property(target, name, value)
    }
}

// =============================================================================
// ContextApi
// =============================================================================

/// An engine whose extension points apply the binding interceptor first.
///
/// Arguments other than the value are passed through untouched, and the
/// engine sees the same call shape it would without the wrapper.
#[derive(Clone, Debug, Default)]
pub struct ContextApi<A> {
    inner: A,
}

impl<A: RenderApi> ContextApi<A> {
    pub fn new(inner: A) -> Self {
        tracing::debug!(engine = std::any::type_name::<A>(), "context tracking enabled");
        Self { inner }
    }

    /// The wrapped engine.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: RenderApi> RenderApi for ContextApi<A> {
    type Node = A::Node;
    type Event = A::Event;

    fn insert(
        &self,
        parent: &Self::Node,
        value: Binding<Content<Self::Node>>,
        marker: Option<&Self::Node>,
    ) {
        self.inner.insert(parent, track_binding(value), marker)
    }

    fn property(&self, target: &Self::Node, name: &str, value: Prop<Self::Event>) {
        self.inner.property(target, name, track_prop(value))
    }
}

/// Compose `api` with the binding interceptor.
pub fn enable_context<A: RenderApi>(api: A) -> ContextApi<A> {
    ContextApi::new(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{ContextRecord, current_record, reset_scope, with_frame};
    use std::cell::RefCell;

    type Reader = Rc<dyn Fn() -> Content<u32>>;

    /// Records what it receives; dynamic values are kept for later firing.
    #[derive(Default)]
    struct Recorder {
        inserted: RefCell<Vec<(u32, Option<u32>, Binding<Content<u32>>)>>,
        props: RefCell<Vec<(u32, String, Prop<String>)>>,
    }

    impl RenderApi for Recorder {
        type Node = u32;
        type Event = String;

        fn insert(&self, parent: &u32, value: Binding<Content<u32>>, marker: Option<&u32>) {
            self.inserted
                .borrow_mut()
                .push((*parent, marker.copied(), value));
        }

        fn property(&self, target: &u32, name: &str, value: Prop<String>) {
            self.props
                .borrow_mut()
                .push((*target, name.to_string(), value));
        }
    }

    fn foo_text() -> Content<u32> {
        let foo = current_record()
            .and_then(|r| r.value::<&'static str>("foo"))
            .unwrap_or("-");
        Content::Text(foo.to_string())
    }

    #[test]
    fn test_insert_wraps_dynamic_values() {
        reset_scope();

        let api = enable_context(Recorder::default());
        let reader: Reader = Rc::new(foo_text);

        with_frame(Some(ContextRecord::new().with("foo", "A")), || {
            api.insert(&1, Binding::Dynamic(reader.clone()), Some(&9));
            api.insert(&1, Binding::Static(Content::Text("plain".into())), None);
        });

        let inserted = api.inner().inserted.borrow();
        assert_eq!(inserted.len(), 2);

        // Trailing arguments untouched
        assert_eq!((inserted[0].0, inserted[0].1), (1, Some(9)));
        assert_eq!(inserted[1].1, None);

        // Fired later, outside any context
        assert_eq!(inserted[0].2.get(), Content::Text("A".into()));
        assert_eq!(inserted[1].2.get(), Content::Text("plain".into()));

        // The unwrapped reader sees nothing
        assert_eq!(reader(), Content::Text("-".into()));
    }

    #[test]
    fn test_property_wraps_listeners() {
        reset_scope();

        let api = enable_context(Recorder::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        with_frame(Some(ContextRecord::new().with("foo", "A")), || {
            api.property(
                &3,
                "onclick",
                Prop::listener(move |event: &String| {
                    let foo = current_record().and_then(|r| r.value::<&'static str>("foo"));
                    seen_clone.borrow_mut().push((event.clone(), foo));
                }),
            );
            api.property(&3, "title", "static".into());
        });

        let props = api.inner().props.borrow();
        let Prop::Listener(listener) = &props[0].2 else {
            panic!("expected listener");
        };
        with_frame(Some(ContextRecord::new().with("foo", "B")), || {
            listener(&"click".to_string());
        });

        assert_eq!(*seen.borrow(), vec![("click".to_string(), Some("A"))]);
        assert_eq!(props[1].1, "title");
        assert!(matches!(&props[1].2, Prop::Value(Binding::Static(s)) if s == "static"));
    }

    #[test]
    fn test_shared_api_handle() {
        reset_scope();

        let api = Rc::new(enable_context(Recorder::default()));
        let handle = api.clone();
        handle.insert(&0, Binding::Static(Content::Empty), None);
        assert_eq!(api.inner().inserted.borrow().len(), 1);
    }
}
