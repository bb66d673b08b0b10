//! Owned binary-tree node.
//!
//! Children are exclusively owned (`Option<Box<_>>`); there are no parent or
//! shared pointers. `id` is assigned once at insertion and identifies the
//! node independently of its value, so duplicate values stay distinguishable.

use serde::{Deserialize, Serialize};

/// A binary-tree node carrying a stable insertion-order id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node<T> {
    /// Insertion-order identifier (never reused).
    pub id: usize,
    /// Stored value.
    pub value: T,
    /// Left subtree.
    #[serde(default)]
    pub left: Option<Box<Node<T>>>,
    /// Right subtree.
    #[serde(default)]
    pub right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    /// New leaf node.
    #[inline]
    #[must_use]
    pub const fn leaf(id: usize, value: T) -> Self {
        Self { id, value, left: None, right: None }
    }

    /// Whether the node has no children.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut n = 0usize;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            n += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        n
    }

    /// Always `false`: a node is at least itself.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Every id in this subtree (unordered).
    #[must_use]
    pub fn ids(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node.id);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        out
    }

    /// Locate the node with `id`.
    #[must_use]
    pub fn find_id(&self, id: usize) -> Option<&Self> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        None
    }

    /// Height in edges along the longest root-to-leaf path (leaf = 0).
    #[must_use]
    pub fn height(&self) -> usize {
        let l = self.left.as_ref().map_or(0, |n| n.height() + 1);
        let r = self.right.as_ref().map_or(0, |n| n.height() + 1);
        l.max(r)
    }
}
