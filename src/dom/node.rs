//! Retained node tree for the reference engine.
//!
//! Nodes are shared handles (`Rc<RefCell<..>>`). A *region* is a transparent
//! node holding the current output of one dynamic insertion; serialization
//! skips straight to its children.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::types::Cleanup;

// =============================================================================
// Event
// =============================================================================

/// Argument passed to listeners by [`DomNode::dispatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: String,
    pub detail: Option<String>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Listener callback type.
pub type Listener = Rc<dyn Fn(&Event)>;

// =============================================================================
// Node data
// =============================================================================

enum NodeKind {
    Element(String),
    Text(String),
    Region,
}

struct NodeData {
    kind: NodeKind,
    attrs: IndexMap<String, String>,
    children: Vec<DomNode>,
    listeners: Vec<(String, Listener)>,
    cleanups: Vec<Cleanup>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: IndexMap::new(),
            children: Vec::new(),
            listeners: Vec::new(),
            cleanups: Vec::new(),
        }
    }
}

/// Handle to a node. Clones share the node.
#[derive(Clone)]
pub struct DomNode(Rc<RefCell<NodeData>>);

impl DomNode {
    fn from_kind(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData::new(kind))))
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Element(tag.into()))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Text(content.into()))
    }

    /// Transparent container for dynamic output.
    pub fn region() -> Self {
        Self::from_kind(NodeKind::Region)
    }

    pub fn ptr_eq(&self, other: &DomNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element(tag) => Some(tag.clone()),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Text(_))
    }

    pub fn is_region(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Region)
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn children(&self) -> Vec<DomNode> {
        self.0.borrow().children.clone()
    }

    /// Children with regions expanded in place.
    pub fn child_nodes(&self) -> Vec<DomNode> {
        let mut out = Vec::new();
        for child in self.children() {
            if child.is_region() {
                out.extend(child.child_nodes());
            } else {
                out.push(child);
            }
        }
        out
    }

    pub fn append(&self, child: DomNode) {
        self.0.borrow_mut().children.push(child);
    }

    /// Insert before `marker` when it is a direct child, else append.
    pub fn insert_before(&self, child: DomNode, marker: Option<&DomNode>) {
        let mut data = self.0.borrow_mut();
        let position = marker.and_then(|m| data.children.iter().position(|c| c.ptr_eq(m)));
        match position {
            Some(index) => data.children.insert(index, child),
            None => data.children.push(child),
        }
    }

    /// Swap in `next`, disposing previous children that are not reused.
    pub fn replace_children(&self, next: Vec<DomNode>) {
        let previous = std::mem::replace(&mut self.0.borrow_mut().children, next);
        let kept = self.children();
        for old in previous {
            if !kept.iter().any(|n| n.ptr_eq(&old)) {
                old.dispose();
            }
        }
    }

    // =========================================================================
    // Attributes & listeners
    // =========================================================================

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        self.0.borrow_mut().attrs.insert(name.into(), value.into());
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    pub fn add_listener(&self, kind: impl Into<String>, listener: Listener) {
        self.0.borrow_mut().listeners.push((kind.into(), listener));
    }

    /// Call every listener registered for `event.kind`; returns how many ran.
    pub fn dispatch(&self, event: &Event) -> usize {
        let listeners: Vec<Listener> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|(kind, _)| *kind == event.kind)
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Register a cleanup run by [`dispose`](Self::dispose).
    pub fn on_cleanup(&self, cleanup: Cleanup) {
        self.0.borrow_mut().cleanups.push(cleanup);
    }

    /// Run cleanups of this node and its subtree (stops bound effects).
    pub fn dispose(&self) {
        let (cleanups, children) = {
            let mut data = self.0.borrow_mut();
            (std::mem::take(&mut data.cleanups), data.children.clone())
        };
        for cleanup in cleanups {
            cleanup();
        }
        for child in children {
            child.dispose();
        }
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_outer(&mut out);
        out
    }

    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        self.write_inner(&mut out);
        out
    }

    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(text) => text.clone(),
            _ => data.children.iter().map(DomNode::text_content).collect(),
        }
    }

    fn write_outer(&self, out: &mut String) {
        if self.is_region() {
            self.write_inner(out);
            return;
        }
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(text) => escape_into(text, false, out),
            NodeKind::Region => {}
            NodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in &data.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                for child in &data.children {
                    child.write_outer(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    fn write_inner(&self, out: &mut String) {
        let children = self.children();
        for child in &children {
            child.write_outer(out);
        }
    }
}

fn escape_into(raw: &str, attribute: bool, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

impl fmt::Debug for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DomNode").field(&self.outer_html()).finish()
    }
}
