// crates/algotrace-tree/src/lib.rs

//! Instrumented binary search tree.
//!
//! - `search`: owned BST (`SearchTree`) with insertion-order node ids,
//!   `<` routing left and `>=` routing right, and successor-promoting delete.
//! - `traversal`: iterative pre-order (one stack), in-order (left spines),
//!   and post-order (two stacks) with per-visit callbacks.
//! - `generator`: builds a tree by insertion and records one step per insert,
//!   each delete stage, and traversal visit.
//!
//! We intentionally avoid broad re-exports beyond the entry points so callers
//! use stable paths like `algotrace_tree::traversal::in_order`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

/// Step generator over tree snapshots.
pub mod generator;
/// Owned binary search tree.
pub mod search;
/// Iterative depth-first traversals.
pub mod traversal;

pub use generator::{
    generate_binary_tree_delete_steps, generate_binary_tree_delete_steps_with,
    generate_binary_tree_steps, generate_binary_tree_steps_with, record_delete,
};
pub use search::SearchTree;
