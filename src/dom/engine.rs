//! Reference engine - binds content and properties to [`DomNode`]s.
//!
//! Dynamic values are driven by `spark_signals::effect`: the effect reads the
//! binding, which tracks whatever signals the binding touches, and writes
//! the result into the tree. The effect's stop function is stored on the
//! node it writes to and runs on [`DomNode::dispose`].

use spark_signals::effect;

use crate::intercept::{ContextApi, RenderApi, enable_context};
use crate::types::{Binding, Content, Prop};

use super::node::{DomNode, Event};

/// Retained-mode engine over [`DomNode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Dom;

/// Turn insertable content into nodes.
pub fn content_nodes(content: Content<DomNode>) -> Vec<DomNode> {
    match content {
        Content::Empty => Vec::new(),
        Content::Text(text) => vec![DomNode::text(text)],
        Content::Node(node) => vec![node],
        Content::Nodes(nodes) => nodes,
    }
}

impl RenderApi for Dom {
    type Node = DomNode;
    type Event = Event;

    fn insert(
        &self,
        parent: &DomNode,
        value: Binding<Content<DomNode>>,
        marker: Option<&DomNode>,
    ) {
        match value {
            Binding::Static(content) => {
                for node in content_nodes(content) {
                    parent.insert_before(node, marker);
                }
            }
            Binding::Dynamic(read) => {
                let region = DomNode::region();
                parent.insert_before(region.clone(), marker);

                let target = region.clone();
                let stop = effect(move || {
                    target.replace_children(content_nodes(read()));
                });
                region.on_cleanup(Box::new(stop));
            }
        }
    }

    fn property(&self, target: &DomNode, name: &str, value: Prop<Event>) {
        match value {
            Prop::Value(Binding::Static(v)) => target.set_attr(name, v),
            Prop::Value(Binding::Dynamic(read)) => {
                let node = target.clone();
                let attr = name.to_string();
                let stop = effect(move || {
                    node.set_attr(attr.clone(), read());
                });
                target.on_cleanup(Box::new(stop));
            }
            Prop::Listener(listener) => {
                let kind = name.strip_prefix("on").unwrap_or(name);
                target.add_listener(kind, listener);
            }
        }
    }
}

/// The reference engine already composed with the binding interceptor.
pub fn context_api() -> ContextApi<Dom> {
    enable_context(Dom)
}
