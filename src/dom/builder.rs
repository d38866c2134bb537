//! Element builder - `h(api, tag, parts)`.
//!
//! Every part goes through the api's insertion extension point, and every
//! prop through its property extension point, so an api composed with
//! [`enable_context`](crate::intercept::enable_context) stamps each dynamic
//! part with the record current while the element is built.

use std::rc::Rc;

use crate::context::{Child, Component, resolve_child};
use crate::intercept::RenderApi;
use crate::types::{Binding, Content, Prop};

use super::node::{DomNode, Event};

/// One child slot of an element.
pub enum Part {
    /// Static structure, materialized immediately.
    Child(Child<DomNode>),
    /// Re-evaluated whenever its reactive dependencies change.
    Dynamic(Rc<dyn Fn() -> Content<DomNode>>),
}

/// A dynamic part from any closure producing insertable content.
pub fn dynamic<T: Into<Content<DomNode>>>(f: impl Fn() -> T + 'static) -> Part {
    Part::Dynamic(Rc::new(move || f().into()))
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::Child(Child::Node(DomNode::text(text)))
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::Child(Child::Node(DomNode::text(text)))
    }
}

impl From<DomNode> for Part {
    fn from(node: DomNode) -> Self {
        Part::Child(Child::Node(node))
    }
}

impl From<Child<DomNode>> for Part {
    fn from(child: Child<DomNode>) -> Self {
        Part::Child(child)
    }
}

impl From<Component<DomNode>> for Part {
    fn from(component: Component<DomNode>) -> Self {
        Part::Child(Child::Component(component))
    }
}

/// Build an element with children.
pub fn h<A>(api: &A, tag: &str, parts: impl IntoIterator<Item = Part>) -> DomNode
where
    A: RenderApi<Node = DomNode, Event = Event> + ?Sized,
{
    h_props(api, tag, [], parts)
}

/// Build an element with props and children.
pub fn h_props<'a, A>(
    api: &A,
    tag: &str,
    props: impl IntoIterator<Item = (&'a str, Prop<Event>)>,
    parts: impl IntoIterator<Item = Part>,
) -> DomNode
where
    A: RenderApi<Node = DomNode, Event = Event> + ?Sized,
{
    let element = DomNode::element(tag);
    for (name, value) in props {
        api.property(&element, name, value);
    }
    for part in parts {
        let value = match part {
            Part::Child(child) => Binding::Static(Content::Nodes(resolve_child(&child))),
            Part::Dynamic(read) => Binding::Dynamic(read),
        };
        api.insert(&element, value, None);
    }
    element
}

/// Materialize `child` into `container`, like appending a rendered component.
pub fn mount<A>(api: &A, container: &DomNode, child: &Child<DomNode>)
where
    A: RenderApi<Node = DomNode, Event = Event> + ?Sized,
{
    api.insert(container, Binding::Static(Content::Nodes(resolve_child(child))), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{context, use_context};
    use crate::context_map;
    use crate::dom::context_api;
    use crate::scope::reset_scope;
    use crate::types::Accessor;
    use spark_signals::signal;

    #[test]
    fn test_h_builds_nested_elements() {
        reset_scope();
        let api = context_api();

        let view = h(&api, "div", [
            "foo".into(),
            h(&api, "p", ["bar".into()]).into(),
        ]);

        assert_eq!(view.outer_html(), "<div>foo<p>bar</p></div>");
    }

    #[test]
    fn test_h_props() {
        reset_scope();
        let api = context_api();

        let view = h_props(&api, "a", [("href", "/x".into())], ["link".into()]);
        assert_eq!(view.outer_html(), "<a href=\"/x\">link</a>");
    }

    #[test]
    fn test_dynamic_part_keeps_context() {
        reset_scope();
        let api = Rc::new(context_api());
        let value = signal(1);

        let api_for_leaf = api.clone();
        let leaf = Child::component(move || {
            let foo = use_context::<Accessor<i32>>("foo").unwrap_or_default();
            Child::Node(h(&*api_for_leaf, "p", [dynamic(move || foo.get())]))
        });

        let root = context(context_map! { "foo" => Accessor::Signal(value.clone()) }, [leaf]);
        let view = h(&*api, "div", [root.into()]);

        assert_eq!(view.outer_html(), "<div><p>1</p></div>");
        value.set(2);
        assert_eq!(view.outer_html(), "<div><p>2</p></div>");
    }

    #[test]
    fn test_mount_into_container() {
        reset_scope();
        let api = context_api();
        let container = DomNode::element("section");

        let child = Child::fragment([
            Child::Node(DomNode::text("a")),
            Child::Node(h(&api, "b", ["c".into()])),
        ]);
        mount(&api, &container, &child);

        assert_eq!(container.inner_html(), "a<b>c</b>");
    }
}
