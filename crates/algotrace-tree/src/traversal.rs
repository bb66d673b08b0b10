//! Iterative depth-first traversals with explicit stacks.
//!
//! - pre-order: one stack; the right child is pushed before the left so the
//!   left subtree is processed first,
//! - in-order: one stack walking left spines,
//! - post-order: two stacks; the second stack ends up holding nodes in
//!   reverse post-order.
//!
//! Each traversal calls `visit` once per node in visiting order.

use algotrace_core::{Node, TraversalOrder};

/// Pre-order traversal.
pub fn pre_order<'a, T, F>(root: Option<&'a Node<T>>, mut visit: F)
where
    F: FnMut(&'a Node<T>),
{
    let mut stack: Vec<&Node<T>> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.right.as_deref());
        stack.extend(node.left.as_deref());
    }
}

/// In-order traversal.
pub fn in_order<'a, T, F>(root: Option<&'a Node<T>>, mut visit: F)
where
    F: FnMut(&'a Node<T>),
{
    let mut stack: Vec<&Node<T>> = Vec::new();
    let mut cur = root;
    loop {
        while let Some(node) = cur {
            stack.push(node);
            cur = node.left.as_deref();
        }
        let Some(node) = stack.pop() else { break };
        visit(node);
        cur = node.right.as_deref();
    }
}

/// Post-order traversal.
pub fn post_order<'a, T, F>(root: Option<&'a Node<T>>, mut visit: F)
where
    F: FnMut(&'a Node<T>),
{
    let mut first: Vec<&Node<T>> = root.into_iter().collect();
    let mut second: Vec<&Node<T>> = Vec::new();
    while let Some(node) = first.pop() {
        second.push(node);
        first.extend(node.left.as_deref());
        first.extend(node.right.as_deref());
    }
    while let Some(node) = second.pop() {
        visit(node);
    }
}

/// Dispatch on `order`.
pub fn traverse<'a, T, F>(order: TraversalOrder, root: Option<&'a Node<T>>, visit: F)
where
    F: FnMut(&'a Node<T>),
{
    match order {
        TraversalOrder::PreOrder => pre_order(root, visit),
        TraversalOrder::InOrder => in_order(root, visit),
        TraversalOrder::PostOrder => post_order(root, visit),
    }
}

/// Ids in pre-order.
#[must_use]
pub fn pre_order_ids<T>(root: Option<&Node<T>>) -> Vec<usize> {
    ids(TraversalOrder::PreOrder, root)
}

/// Ids in in-order.
#[must_use]
pub fn in_order_ids<T>(root: Option<&Node<T>>) -> Vec<usize> {
    ids(TraversalOrder::InOrder, root)
}

/// Ids in post-order.
#[must_use]
pub fn post_order_ids<T>(root: Option<&Node<T>>) -> Vec<usize> {
    ids(TraversalOrder::PostOrder, root)
}

fn ids<T>(order: TraversalOrder, root: Option<&Node<T>>) -> Vec<usize> {
    let mut out = Vec::new();
    traverse(order, root, |n| out.push(n.id));
    out
}
