//! Tree trace generator.
//!
//! Inserts the input in order, recording the whole tree after every insert,
//! then records one step per visit for pre-order, in-order, and post-order
//! (in that order). Each visit step carries the cumulative id path of its
//! traversal. A node id is settled once the node is inserted.
//!
//! Deletions ([`record_delete`]) record one step per node on the search path,
//! a successor step when the target has two children, and the resulting tree.
//! The settled set never shrinks: ids that leave the tree stay settled.

use algotrace_core::{DeletePhase, Extra, Recorder, Step, StepKind, TraceConfig, TraversalOrder};
use anyhow::{anyhow, ensure, Context, Result};
use tracing::debug;

use crate::search::SearchTree;
use crate::traversal::traverse;

/// Record the default tree trace for `values`.
///
/// # Errors
/// Fails if any value cannot be ordered (NaN).
pub fn generate_binary_tree_steps(values: &[f64]) -> Result<Vec<Step>> {
    generate_binary_tree_steps_with(values, &TraceConfig::default())
}

/// Record the tree trace for `values`, substituting
/// `cfg.default_tree_values` when `values` is empty.
///
/// # Errors
/// Fails if any value cannot be ordered (NaN).
pub fn generate_binary_tree_steps_with(values: &[f64], cfg: &TraceConfig) -> Result<Vec<Step>> {
    let mut rec = Recorder::new(StepKind::Tree);
    let tree = record_inserts(&mut rec, values, cfg)?;
    record_traversals(&mut rec, &tree);

    debug!(nodes = tree.len(), steps = rec.len(), "generated tree trace");
    Ok(rec.finish())
}

/// Like [`generate_binary_tree_steps`], with `deletions` applied in order
/// between the inserts and the traversals.
///
/// # Errors
/// Fails if any value cannot be ordered (NaN).
pub fn generate_binary_tree_delete_steps(values: &[f64], deletions: &[f64]) -> Result<Vec<Step>> {
    generate_binary_tree_delete_steps_with(values, deletions, &TraceConfig::default())
}

/// Like [`generate_binary_tree_steps_with`], with `deletions` applied in
/// order between the inserts and the traversals.
///
/// # Errors
/// Fails if any value cannot be ordered (NaN).
pub fn generate_binary_tree_delete_steps_with(
    values: &[f64],
    deletions: &[f64],
    cfg: &TraceConfig,
) -> Result<Vec<Step>> {
    let mut rec = Recorder::new(StepKind::Tree);
    let mut tree = record_inserts(&mut rec, values, cfg)?;
    let mut removed = 0usize;
    for &v in deletions {
        if record_delete(&mut rec, &mut tree, v)? {
            removed += 1;
        }
    }
    record_traversals(&mut rec, &tree);

    debug!(nodes = tree.len(), removed, steps = rec.len(), "generated tree delete trace");
    Ok(rec.finish())
}

/// Delete `value` from `tree`, recording the search path, the successor
/// lookup (two children), and the tree after the removal. Returns whether a
/// node was removed; a miss records a single not-found step after the path.
///
/// # Errors
/// Fails if `value` cannot be ordered against a node on its path.
pub fn record_delete(rec: &mut Recorder, tree: &mut SearchTree<f64>, value: f64) -> Result<bool> {
    let path = tree
        .search_path(&value)
        .with_context(|| format!("cannot delete {value}"))?;
    let extra = |phase, path: &[usize], removed, replacement| Extra::Delete {
        phase,
        target: value,
        path: path.to_vec(),
        removed,
        replacement,
    };

    for (i, &id) in path.iter().enumerate() {
        let at = tree.value_of(id).map_or_else(String::new, |v| format!(" ({v})"));
        rec.record(
            Step::tree(tree.root(), format!("Delete {value}: visit node {id}{at}"))
                .primary(id)
                .with_extra(extra(DeletePhase::Search, &path[..=i], None, None)),
        );
    }

    let Some(id) = path.last().copied().filter(|&id| tree.value_of(id) == Some(&value)) else {
        rec.record(
            Step::tree(tree.root(), format!("Delete {value}: not found"))
                .with_extra(extra(DeletePhase::NotFound, &path, None, None)),
        );
        return Ok(false);
    };

    let node = tree
        .root()
        .and_then(|r| r.find_id(id))
        .ok_or_else(|| anyhow!("node {id} is on the search path but not in the tree"))?;
    let (phase, replacement) = if node.is_leaf() {
        (DeletePhase::RemoveLeaf, None)
    } else if let (Some(_), Some(right)) = (node.left.as_deref(), node.right.as_deref()) {
        let mut succ = right;
        while let Some(next) = succ.left.as_deref() {
            succ = next;
        }
        rec.record(
            Step::tree(
                tree.root(),
                format!(
                    "Delete {value}: node {id} has two children; successor is node {} ({})",
                    succ.id, succ.value
                ),
            )
            .primary(id)
            .secondary(succ.id)
            .with_extra(extra(DeletePhase::FindSuccessor, &path, Some(id), Some(succ.id))),
        );
        (DeletePhase::PromoteSuccessor, Some(succ.id))
    } else {
        let child = node.left.as_deref().or(node.right.as_deref()).map(|c| c.id);
        (DeletePhase::Splice, child)
    };

    ensure!(tree.delete(&value)?, "node {id} disappeared before deletion");

    let desc = match (phase, replacement) {
        (DeletePhase::PromoteSuccessor, Some(s)) => {
            format!("Delete {value}: successor node {s} takes the place of node {id}")
        }
        (DeletePhase::Splice, Some(c)) => format!("Delete {value}: node {id} replaced by its child node {c}"),
        _ => format!("Delete {value}: removed leaf node {id}"),
    };
    let mut step = Step::tree(tree.root(), desc).with_extra(extra(phase, &path, Some(id), replacement));
    if let Some(r) = replacement {
        step = step.primary(r);
    }
    rec.record(step);
    Ok(true)
}

/// Insert `values` (or the configured defaults when empty), one step each.
fn record_inserts(rec: &mut Recorder, values: &[f64], cfg: &TraceConfig) -> Result<SearchTree<f64>> {
    let values = if values.is_empty() {
        debug!(n = cfg.default_tree_values.len(), "no tree input; substituting defaults");
        rec.record(
            Step::tree(None, "No input provided; using default values").with_extra(
                Extra::DefaultInput { values: cfg.default_tree_values.clone() },
            ),
        );
        cfg.default_tree_values.as_slice()
    } else {
        values
    };

    let mut tree = SearchTree::new();
    for (pos, &v) in values.iter().enumerate() {
        let id = tree
            .insert(v)
            .with_context(|| format!("cannot insert value at input position {pos}"))?;
        rec.settle(id);
        rec.record(Step::tree(tree.root(), format!("Insert {v} as node {id}")).primary(id));
    }
    Ok(tree)
}

/// Pre-order, in-order, then post-order; one step per visit.
fn record_traversals(rec: &mut Recorder, tree: &SearchTree<f64>) {
    for order in [TraversalOrder::PreOrder, TraversalOrder::InOrder, TraversalOrder::PostOrder] {
        let root = tree.root();
        let mut path = Vec::with_capacity(tree.len());
        traverse(order, root, |node| {
            path.push(node.id);
            rec.record(
                Step::tree(root, format!("{}: visit {} (node {})", order.tag(), node.value, node.id))
                    .primary(node.id)
                    .with_extra(Extra::Traversal { order, path: path.clone() }),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algotrace_core::{Snapshot, TraceChecker};

    use crate::traversal::in_order_ids;

    #[test]
    fn insert_steps_snapshot_growing_tree() {
        let steps = generate_binary_tree_steps(&[2.0, 1.0, 3.0]).unwrap();
        let sizes: Vec<usize> = steps.iter().take(3).map(|s| s.snapshot.len()).collect();
        assert_eq!(sizes, vec![1, 2, 3]);
        assert_eq!(steps.len(), 3 + 3 * 3);
    }

    #[test]
    fn empty_input_substitutes_defaults() {
        let steps = generate_binary_tree_steps(&[]).unwrap();
        assert_eq!(steps[0].snapshot, Snapshot::Tree(None));
        match &steps[0].extra {
            Extra::DefaultInput { values } => assert_eq!(values.len(), 7),
            other => panic!("unexpected extra {other:?}"),
        }
        assert_eq!(steps[1].tree_root().map(|r| r.value), Some(50.0));
    }

    #[test]
    fn rejects_nan() {
        let err = generate_binary_tree_steps(&[1.0, f64::NAN]).unwrap_err();
        assert!(format!("{err:#}").contains("input position 1"), "{err:#}");
    }

    fn delete_phases(steps: &[Step]) -> Vec<(DeletePhase, Option<usize>, Option<usize>)> {
        steps
            .iter()
            .filter_map(|s| match &s.extra {
                Extra::Delete { phase, removed, replacement, .. } if *phase != DeletePhase::Search => {
                    Some((*phase, *removed, *replacement))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn records_leaf_splice_and_successor_deletions() {
        //        50(0)
        //      /       \
        //   30(1)     70(2)
        //   /  \      /  \
        // 20(3) 40(4) 60(5) 80(6)
        let values = [50.0, 30.0, 70.0, 20.0, 40.0, 60.0, 80.0];
        let steps = generate_binary_tree_delete_steps(&values, &[20.0, 30.0, 50.0]).unwrap();

        assert_eq!(
            delete_phases(&steps),
            vec![
                (DeletePhase::RemoveLeaf, Some(3), None),
                (DeletePhase::Splice, Some(1), Some(4)),
                (DeletePhase::FindSuccessor, Some(0), Some(5)),
                (DeletePhase::PromoteSuccessor, Some(0), Some(5)),
            ]
        );

        let promoted = steps
            .iter()
            .find(|s| matches!(s.extra, Extra::Delete { phase: DeletePhase::PromoteSuccessor, .. }))
            .unwrap();
        let root = promoted.tree_root().unwrap();
        assert_eq!((root.id, root.value), (5, 60.0));
        assert_eq!(root.len(), 4);
        assert_eq!(promoted.primary_index, Some(5));
        // Removed ids stay settled.
        assert_eq!(promoted.settled.len(), 7);

        let summary = TraceChecker::new().check(&steps, None).unwrap();
        assert_eq!(summary.settled, 7);
    }

    #[test]
    fn search_steps_follow_the_path() {
        let steps = generate_binary_tree_delete_steps(&[50.0, 30.0, 40.0], &[40.0]).unwrap();
        let paths: Vec<Vec<usize>> = steps
            .iter()
            .filter_map(|s| match &s.extra {
                Extra::Delete { phase: DeletePhase::Search, path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(paths, vec![vec![0], vec![0, 1], vec![0, 1, 2]]);
    }

    #[test]
    fn missing_value_records_not_found_and_keeps_tree() {
        let mut rec = Recorder::new(StepKind::Tree);
        let mut tree = record_inserts(&mut rec, &[5.0, 3.0], &TraceConfig::default()).unwrap();
        let before = rec.len();
        assert!(!record_delete(&mut rec, &mut tree, 4.0).unwrap());
        assert_eq!(tree.len(), 2);
        let steps = rec.finish();
        let last = steps.last().unwrap();
        assert!(matches!(last.extra, Extra::Delete { phase: DeletePhase::NotFound, .. }));
        assert_eq!(steps.len(), before + 2 + 1);
        assert_eq!(in_order_ids(tree.root()), vec![1, 0]);
    }

    #[test]
    fn deleting_every_node_leaves_a_valid_trace() {
        let steps = generate_binary_tree_delete_steps(&[2.0, 1.0, 3.0], &[2.0, 1.0, 3.0]).unwrap();
        let last = steps.last().unwrap();
        assert_eq!(last.snapshot, Snapshot::Tree(None));
        assert!(TraceChecker::new().check(&steps, None).is_ok());
    }
}
