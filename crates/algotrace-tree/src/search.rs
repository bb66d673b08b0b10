//! Owned binary search tree over `PartialOrd` values.
//!
//! Ids are handed out in insertion order from a counter that never rewinds,
//! so an id identifies one insertion even after deletions. Values that cannot
//! be ordered (`partial_cmp` returns `None`, e.g. NaN) are rejected with an
//! error instead of being routed arbitrarily.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use algotrace_core::Node;
use anyhow::{bail, Result};

type Link<T> = Option<Box<Node<T>>>;

/// Binary search tree that owns its nodes.
#[derive(Clone, Debug)]
pub struct SearchTree<T> {
    root: Link<T>,
    next_id: usize,
    len: usize,
}

impl<T> Default for SearchTree<T> {
    fn default() -> Self {
        Self { root: None, next_id: 0, len: 0 }
    }
}

impl<T: PartialOrd> SearchTree<T> {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Root node, if any.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Number of nodes currently in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` and return its id. Smaller values go left; equal or
    /// larger values go right.
    ///
    /// # Errors
    /// Fails if `value` cannot be ordered against itself or a node on its path.
    pub fn insert(&mut self, value: T) -> Result<usize> {
        let id = self.next_id;
        if value.partial_cmp(&value).is_none() {
            bail!("value for node {id} cannot be ordered");
        }
        insert_at(&mut self.root, id, value)?;
        self.next_id += 1;
        self.len += 1;
        Ok(id)
    }

    /// Id of the first node holding `value` on the search path.
    ///
    /// # Errors
    /// Fails if `value` cannot be ordered against a node on its path.
    pub fn find(&self, value: &T) -> Result<Option<usize>> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match value.partial_cmp(&node.value) {
                None => bail!("value cannot be ordered against node {}", node.id),
                Some(Ordering::Equal) => return Ok(Some(node.id)),
                Some(Ordering::Less) => node.left.as_deref(),
                Some(Ordering::Greater) => node.right.as_deref(),
            };
        }
        Ok(None)
    }

    /// Ids visited while searching for `value`, ending at the first match
    /// (or at the last node examined when there is none).
    ///
    /// # Errors
    /// Fails if `value` cannot be ordered against a node on its path.
    pub fn search_path(&self, value: &T) -> Result<Vec<usize>> {
        let mut path = Vec::new();
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            path.push(node.id);
            cur = match value.partial_cmp(&node.value) {
                None => bail!("value cannot be ordered against node {}", node.id),
                Some(Ordering::Equal) => break,
                Some(Ordering::Less) => node.left.as_deref(),
                Some(Ordering::Greater) => node.right.as_deref(),
            };
        }
        Ok(path)
    }

    /// Remove the first node holding `value` on the search path. A node with
    /// two children takes over its in-order successor's value and id, and the
    /// successor is unlinked from the right subtree. Returns whether a node
    /// was removed.
    ///
    /// # Errors
    /// Fails if `value` cannot be ordered against a node on its path.
    pub fn delete(&mut self, value: &T) -> Result<bool> {
        let removed = delete_at(&mut self.root, value)?;
        if removed {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Value stored under `id`, if that node is still in the tree.
    #[must_use]
    pub fn value_of(&self, id: usize) -> Option<&T> {
        self.root().and_then(|r| r.find_id(id)).map(|n| &n.value)
    }

    /// Whether a node with `id` is currently in the tree.
    #[must_use]
    pub fn contains_id(&self, id: usize) -> bool {
        self.value_of(id).is_some()
    }
}

impl<T: PartialOrd + Clone> SearchTree<T> {
    /// Every live node's value keyed by id.
    #[must_use]
    pub fn values_by_id(&self) -> BTreeMap<usize, T> {
        let mut out = BTreeMap::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.insert(node.id, node.value.clone());
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        out
    }
}

fn insert_at<T: PartialOrd>(slot: &mut Link<T>, id: usize, value: T) -> Result<()> {
    match slot {
        None => {
            *slot = Some(Box::new(Node::leaf(id, value)));
            Ok(())
        }
        Some(node) => match value.partial_cmp(&node.value) {
            None => bail!("value for node {id} cannot be ordered against node {}", node.id),
            Some(Ordering::Less) => insert_at(&mut node.left, id, value),
            Some(_) => insert_at(&mut node.right, id, value),
        },
    }
}

fn delete_at<T: PartialOrd>(slot: &mut Link<T>, value: &T) -> Result<bool> {
    let Some(node) = slot else {
        return Ok(false);
    };
    match value.partial_cmp(&node.value) {
        None => bail!("value cannot be ordered against node {}", node.id),
        Some(Ordering::Less) => delete_at(&mut node.left, value),
        Some(Ordering::Greater) => delete_at(&mut node.right, value),
        Some(Ordering::Equal) => {
            match (node.left.take(), node.right.take()) {
                (None, None) => *slot = None,
                (Some(only), None) | (None, Some(only)) => *slot = Some(only),
                (Some(left), Some(right)) => {
                    let (successor, rest) = take_min(right);
                    let Node { id, value, .. } = *successor;
                    node.left = Some(left);
                    node.right = rest;
                    node.id = id;
                    node.value = value;
                }
            }
            Ok(true)
        }
    }
}

/// Detach the minimum node of `node`'s subtree; returns it and what remains.
fn take_min<T>(mut node: Box<Node<T>>) -> (Box<Node<T>>, Link<T>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (node, rest)
        }
        Some(left) => {
            let (min, rest) = take_min(left);
            node.left = rest;
            (min, Some(node))
        }
    }
}
