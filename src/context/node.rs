//! Context Node - Publish values to a subtree.
//!
//! A context node pairs an authored mapping with a list of children. Its
//! render function merges the mapping over the current record, then
//! materializes every child under the merged record before restoring the
//! previous one:
//!
//! ```text
//! render()
//!   merged = current_record() <- mapping      (mapping shadows)
//!   with_frame(merged):
//!     Node       -> emit
//!     Fragment   -> recurse, splice in place
//!     Component  -> call until not a component, then recurse
//!   restore
//! ```
//!
//! Nothing is cached between renders; each call recomputes the merge from
//! whatever record is current at that moment.

use std::fmt;
use std::rc::Rc;

use crate::scope::{ContextRecord, current_record, with_frame};

// =============================================================================
// Child
// =============================================================================

/// A component: invocable producing a child (possibly another component).
pub type Component<N> = Rc<dyn Fn() -> Child<N>>;

/// The closed set of child kinds a tree is built from.
pub enum Child<N> {
    /// A concrete engine node.
    Node(N),
    /// A component, called during materialization.
    Component(Component<N>),
    /// A grouping whose contents are spliced in place.
    Fragment(Vec<Child<N>>),
}

impl<N> Child<N> {
    pub fn component(f: impl Fn() -> Child<N> + 'static) -> Self {
        Child::Component(Rc::new(f))
    }

    pub fn fragment(children: impl IntoIterator<Item = Child<N>>) -> Self {
        Child::Fragment(children.into_iter().collect())
    }

    pub fn empty() -> Self {
        Child::Fragment(Vec::new())
    }
}

impl<N: Clone> Clone for Child<N> {
    fn clone(&self) -> Self {
        match self {
            Child::Node(n) => Child::Node(n.clone()),
            Child::Component(f) => Child::Component(Rc::clone(f)),
            Child::Fragment(children) => Child::Fragment(children.clone()),
        }
    }
}

impl<N> From<Component<N>> for Child<N> {
    fn from(component: Component<N>) -> Self {
        Child::Component(component)
    }
}

impl<N> From<Vec<Child<N>>> for Child<N> {
    fn from(children: Vec<Child<N>>) -> Self {
        Child::Fragment(children)
    }
}

impl<N: fmt::Debug> fmt::Debug for Child<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Child::Component(_) => f.write_str("Component(..)"),
            Child::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
        }
    }
}

// =============================================================================
// Materialization
// =============================================================================

/// Resolve `children` into a flat, order-preserving list of nodes.
///
/// Runs under whatever record is current; components read it synchronously.
pub fn resolve_children<N: Clone>(children: &[Child<N>]) -> Vec<N> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        resolve_into(child, &mut out);
    }
    out
}

/// Resolve a single child.
pub fn resolve_child<N: Clone>(child: &Child<N>) -> Vec<N> {
    let mut out = Vec::new();
    resolve_into(child, &mut out);
    out
}

fn resolve_into<N: Clone>(child: &Child<N>, out: &mut Vec<N>) {
    match child {
        Child::Node(node) => out.push(node.clone()),
        Child::Fragment(children) => {
            for child in children {
                resolve_into(child, out);
            }
        }
        Child::Component(component) => {
            // Components may return components
            let mut result = component();
            while let Child::Component(next) = result {
                result = next();
            }
            resolve_into(&result, out);
        }
    }
}

// =============================================================================
// ContextNode
// =============================================================================

/// An authored mapping plus the children that should see it.
pub struct ContextNode<N> {
    mapping: ContextRecord,
    children: Rc<[Child<N>]>,
}

impl<N: Clone + 'static> ContextNode<N> {
    pub fn new(mapping: ContextRecord, children: impl IntoIterator<Item = Child<N>>) -> Self {
        Self {
            mapping,
            children: children.into_iter().collect(),
        }
    }

    /// Materialize the children under `current record <- mapping`.
    pub fn render(&self) -> Vec<N> {
        let inherited = current_record().unwrap_or_default();
        let merged = inherited.merge(&self.mapping);
        tracing::trace!(
            own = self.mapping.len(),
            visible = merged.len(),
            children = self.children.len(),
            "context node opened"
        );
        with_frame(Some(merged), || resolve_children(&self.children))
    }

    /// The render function, usable anywhere a component is.
    pub fn into_component(self) -> Component<N> {
        Rc::new(move || Child::Fragment(self.render().into_iter().map(Child::Node).collect()))
    }
}

impl<N> Clone for ContextNode<N> {
    fn clone(&self) -> Self {
        Self {
            mapping: self.mapping.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

/// Build a context node and return its render function.
pub fn context<N: Clone + 'static>(
    mapping: ContextRecord,
    children: impl IntoIterator<Item = Child<N>>,
) -> Component<N> {
    ContextNode::new(mapping, children).into_component()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::get_context_record;
    use crate::context_map;
    use crate::scope::reset_scope;
    use std::cell::RefCell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn leaf(s: &'static str) -> Child<&'static str> {
        Child::Node(s)
    }

    /// Component emitting the value of `key` as a node.
    fn reader(key: &'static str) -> Child<&'static str> {
        Child::component(move || {
            let value = get_context_record()
                .and_then(|r| r.value::<&'static str>(key))
                .unwrap_or("-");
            Child::Node(value)
        })
    }

    #[test]
    fn test_render_plain_children() {
        reset_scope();

        let render = context(ContextRecord::new(), [leaf("a"), leaf("b")]);
        let out = resolve_child(&Child::Component(render));
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn test_children_see_mapping() {
        reset_scope();

        let node = ContextNode::new(context_map! { "foo" => "1" }, [reader("foo")]);
        assert_eq!(node.render(), vec!["1"]);
        assert!(get_context_record().is_none());
    }

    #[test]
    fn test_shadowing_is_positional() {
        reset_scope();

        let inner = context(context_map! { "foo" => "10" }, [reader("foo"), reader("bar")]);
        let outer = ContextNode::new(
            context_map! { "foo" => "1", "bar" => "2" },
            [reader("foo"), Child::Component(inner), reader("foo")],
        );

        assert_eq!(outer.render(), vec!["1", "10", "2", "1"]);
    }

    #[test]
    fn test_flattening_matches_manual() {
        reset_scope();

        let nested = Child::fragment([
            leaf("a"),
            Child::fragment([leaf("b"), Child::fragment([leaf("c")])]),
            // component returning a component returning a fragment
            Child::component(|| {
                Child::component(|| Child::fragment([leaf("d"), leaf("e")]))
            }),
            Child::empty(),
            leaf("f"),
        ]);

        let manual = vec!["a", "b", "c", "d", "e", "f"];
        let render = context(ContextRecord::new(), [nested]);
        assert_eq!(resolve_child(&Child::Component(render)), manual);
    }

    #[test]
    fn test_empty_mapping_is_passthrough() {
        reset_scope();

        let children = vec![reader("foo"), leaf("x")];
        let wrapped = ContextNode::new(ContextRecord::new(), children.clone());

        crate::scope::with_frame(Some(context_map! { "foo" => "outer" }), || {
            assert_eq!(wrapped.render(), resolve_children(&children));
        });
    }

    #[test]
    fn test_rerender_is_idempotent() {
        reset_scope();

        let node = ContextNode::new(
            context_map! { "foo" => "1" },
            [reader("foo"), Child::fragment([leaf("a"), reader("bar")])],
        );

        assert_eq!(node.render(), node.render());
    }

    #[test]
    fn test_record_restored_between_siblings() {
        reset_scope();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let count_keys: Child<&'static str> = {
            let seen = seen.clone();
            Child::component(move || {
                let keys = get_context_record().map_or(0, |r| r.len());
                seen.borrow_mut().push(keys);
                Child::empty()
            })
        };

        let first = context(context_map! { "a" => 1, "b" => 2 }, [count_keys.clone()]);
        let outer = ContextNode::new(
            context_map! { "a" => 0 },
            [Child::Component(first), count_keys.clone()],
        );
        outer.render();

        assert_eq!(*seen.borrow(), vec![2, 1]);
        assert!(get_context_record().is_none());
    }

    #[test]
    fn test_panicking_child_restores_record() {
        reset_scope();

        fn explode() -> Child<&'static str> {
            panic!("component failed");
        }

        let node = ContextNode::new(
            context_map! { "foo" => "inner" },
            [reader("foo"), Child::component(explode)],
        );
        let outer = context_map! { "foo" => "outer" };

        crate::scope::with_frame(Some(outer.clone()), || {
            let result = catch_unwind(AssertUnwindSafe(|| node.render()));
            assert!(result.is_err());

            let current = get_context_record().expect("outer record");
            assert!(current.ptr_eq(&outer));
        });
        assert!(get_context_record().is_none());
    }

    #[test]
    fn test_reads_fresh_inherited_record_each_render() {
        reset_scope();

        let node = ContextNode::new(context_map! { "foo" => "own" }, [reader("bar")]);

        let first = crate::scope::with_frame(Some(context_map! { "bar" => "x" }), || node.render());
        let second = crate::scope::with_frame(Some(context_map! { "bar" => "y" }), || node.render());

        assert_eq!(first, vec!["x"]);
        assert_eq!(second, vec!["y"]);
    }
}
