//! Canonical step schema shared by every generator.
//!
//! A trace is a `Vec<Step>` in exact chronological order. Each step owns a
//! frozen copy of the structure being worked on (`Snapshot`), the indices
//! under comparison, the settled set, and an algorithm-specific payload
//! (`Extra`). The serialized form uses camelCase field names so external
//! renderers can consume it directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::node::Node;

/// Discriminator for the snapshot shape carried by a step.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Flat numeric array.
    Sorting,
    /// Binary search tree.
    Tree,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sorting => f.write_str("sorting"),
            Self::Tree => f.write_str("tree"),
        }
    }
}

/// Frozen copy of the primary structure at one instant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Snapshot {
    /// Working array of a sorting generator.
    Array(Vec<f64>),
    /// Whole tree (`None` for the empty tree).
    Tree(Option<Node<f64>>),
}

impl Snapshot {
    /// Number of positions (array length or node count).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Array(v) => v.len(),
            Self::Tree(root) => root.as_ref().map_or(0, Node::len),
        }
    }

    /// Whether the snapshot holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which depth-first order a traversal step belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, left, right.
    #[serde(rename = "preorder")]
    PreOrder,
    /// Left, node, right.
    #[serde(rename = "inorder")]
    InOrder,
    /// Left, right, node.
    #[serde(rename = "postorder")]
    PostOrder,
}

impl TraversalOrder {
    /// Tag used in descriptions and serialized payloads.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PreOrder => "preorder",
            Self::InOrder => "inorder",
            Self::PostOrder => "postorder",
        }
    }
}

/// Phases of counting sort.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CountingPhase {
    /// Tallying occurrences.
    Count,
    /// Turning counts into prefix sums.
    Accumulate,
    /// Writing the output array back-to-front.
    Place,
    /// Copying output into the working array.
    CopyBack,
}

/// Phases of bucket and radix sort.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BucketPhase {
    /// Assigning one element to a bucket.
    Distribute,
    /// Every element has been assigned.
    Distributed,
    /// Sorting inside a single bucket.
    SortBucket,
    /// Removing an element from a bucket.
    Extract,
    /// Writing an element back into the working array.
    Collect,
}

/// Stages of a recorded tree deletion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeletePhase {
    /// Walking the search path toward the target.
    Search,
    /// The target is not in the tree; nothing changes.
    NotFound,
    /// A leaf was unlinked.
    RemoveLeaf,
    /// A node with one child was replaced by that child.
    Splice,
    /// The in-order successor of a two-child node was located.
    FindSuccessor,
    /// The successor's value and id moved into the target's slot.
    PromoteSuccessor,
}

/// Algorithm-specific payload. Consumers must ignore variants or fields they
/// do not understand.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Extra {
    /// No payload.
    #[default]
    None,
    /// Highlighted inclusive range `[lo, hi]`.
    Range {
        /// First index.
        lo: usize,
        /// Last index (inclusive).
        hi: usize,
    },
    /// Selection sort round state.
    Selection {
        /// Round number (0-based); also the slot being filled.
        round: usize,
        /// Index of the running minimum.
        min_index: usize,
    },
    /// Insertion sort key being placed.
    Insertion {
        /// Key value lifted out of the array.
        key: f64,
        /// Index the key was taken from.
        round: usize,
    },
    /// Merge window and its auxiliary buffer.
    Merge {
        /// Window start.
        lo: usize,
        /// Last index of the left half.
        mid: usize,
        /// Window end (inclusive).
        hi: usize,
        /// Copy of the window taken before merging.
        aux: Vec<f64>,
    },
    /// Lomuto partition state.
    Partition {
        /// Range start.
        lo: usize,
        /// Range end (inclusive, also the pivot slot before placement).
        hi: usize,
        /// Current pivot position.
        pivot_index: usize,
        /// Pivot value.
        pivot: f64,
        /// Last index of the "less than pivot" region, if non-empty.
        boundary: Option<usize>,
    },
    /// Heapify state.
    Heap {
        /// Node being heapified.
        node: usize,
        /// Left child, if inside the heap.
        left: Option<usize>,
        /// Right child, if inside the heap.
        right: Option<usize>,
        /// Current largest of node and children.
        largest: usize,
        /// Number of elements still in the heap.
        heap_size: usize,
    },
    /// Counting sort arrays.
    Counting {
        /// Current phase.
        phase: CountingPhase,
        /// Value represented by `counts[0]`.
        min: i64,
        /// Counting / prefix-sum array.
        counts: Vec<usize>,
        /// Output array under construction.
        output: Vec<Option<f64>>,
        /// Index into `counts` touched by this step.
        focus: Option<usize>,
    },
    /// Bucket sort buckets.
    Buckets {
        /// Current phase.
        phase: BucketPhase,
        /// Independent copy of every bucket.
        buckets: Vec<Vec<f64>>,
        /// Bucket touched by this step.
        active_bucket: Option<usize>,
        /// Position inside the active bucket.
        focus: Option<usize>,
        /// Second position inside the active bucket.
        compare: Option<usize>,
    },
    /// Radix sort digit buckets.
    Radix {
        /// Current phase.
        phase: BucketPhase,
        /// Pass number (0-based, least significant digit first).
        pass: usize,
        /// Total number of passes.
        passes: usize,
        /// Decimal place value of the current digit (1, 10, 100, …).
        place: u64,
        /// Independent copy of the ten digit buckets.
        buckets: Vec<Vec<f64>>,
        /// Bucket touched by this step.
        active_bucket: Option<usize>,
    },
    /// Tree traversal progress.
    Traversal {
        /// Which traversal this visit belongs to.
        order: TraversalOrder,
        /// Node ids visited so far in this traversal.
        path: Vec<usize>,
    },
    /// Recorded when fallback input was substituted.
    DefaultInput {
        /// Values used instead of the missing input.
        values: Vec<f64>,
    },
    /// Recorded when the input is outside the algorithm's domain.
    NotApplicable {
        /// Why the algorithm could not run.
        reason: String,
    },
    /// Tree deletion progress.
    Delete {
        /// Current stage.
        phase: DeletePhase,
        /// Value being deleted.
        target: f64,
        /// Node ids visited on the search path so far.
        path: Vec<usize>,
        /// Id of the node taken out of the tree, once known.
        removed: Option<usize>,
        /// Id of the node that took the removed node's place, if any.
        replacement: Option<usize>,
    },
    /// Payload type written by a newer producer; its fields are dropped.
    #[serde(other)]
    Unknown,
}

/// One recorded instant of execution.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Snapshot shape discriminator.
    pub kind: StepKind,
    /// Frozen copy of the primary structure.
    pub snapshot: Snapshot,
    /// First element/node under comparison or exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_index: Option<usize>,
    /// Second element/node under comparison or exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_index: Option<usize>,
    /// Human-readable narration.
    pub description: String,
    /// Indices (or node ids) already in their final position.
    #[serde(rename = "settledPositions")]
    pub settled: BTreeSet<usize>,
    /// Algorithm-specific payload.
    #[serde(default)]
    pub extra: Extra,
}

impl Step {
    /// Start a sorting step from a copy of `values`.
    #[must_use]
    pub fn sorting(values: &[f64], description: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Sorting,
            snapshot: Snapshot::Array(values.to_vec()),
            primary_index: None,
            secondary_index: None,
            description: description.into(),
            settled: BTreeSet::new(),
            extra: Extra::None,
        }
    }

    /// Start a tree step from a deep copy of `root`.
    #[must_use]
    pub fn tree(root: Option<&Node<f64>>, description: impl Into<String>) -> Self {
        Self {
            kind: StepKind::Tree,
            snapshot: Snapshot::Tree(root.cloned()),
            primary_index: None,
            secondary_index: None,
            description: description.into(),
            settled: BTreeSet::new(),
            extra: Extra::None,
        }
    }

    /// Set the primary index.
    #[inline]
    #[must_use]
    pub const fn primary(mut self, index: usize) -> Self {
        self.primary_index = Some(index);
        self
    }

    /// Set the secondary index.
    #[inline]
    #[must_use]
    pub const fn secondary(mut self, index: usize) -> Self {
        self.secondary_index = Some(index);
        self
    }

    /// Attach an algorithm-specific payload.
    #[inline]
    #[must_use]
    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extra = extra;
        self
    }

    /// The array snapshot, if this is a sorting step.
    #[must_use]
    pub fn array(&self) -> Option<&[f64]> {
        match &self.snapshot {
            Snapshot::Array(v) => Some(v),
            Snapshot::Tree(_) => None,
        }
    }

    /// The tree snapshot root, if this is a non-empty tree step.
    #[must_use]
    pub fn tree_root(&self) -> Option<&Node<f64>> {
        match &self.snapshot {
            Snapshot::Tree(root) => root.as_ref(),
            Snapshot::Array(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorting_step_copies_input() {
        let mut arr = vec![3.0, 1.0];
        let step = Step::sorting(&arr, "start").primary(0).secondary(1);
        arr[0] = 99.0;
        assert_eq!(step.array(), Some(&[3.0, 1.0][..]));
        assert_eq!(step.primary_index, Some(0));
        assert_eq!(step.secondary_index, Some(1));
        assert_eq!(step.kind, StepKind::Sorting);
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let step = Step::sorting(&[1.0], "only").primary(0);
        let v = serde_json::to_value(&step).unwrap();
        assert_eq!(v["kind"], "sorting");
        assert_eq!(v["primaryIndex"], 0);
        assert!(v.get("secondaryIndex").is_none());
        assert!(v["settledPositions"].as_array().unwrap().is_empty());
        assert_eq!(v["extra"]["type"], "none");
    }

    #[test]
    fn unknown_extra_fields_are_ignored() {
        let json = r#"{
            "kind": "sorting",
            "snapshot": [2.0, 1.0],
            "description": "x",
            "settledPositions": [1],
            "extra": { "type": "range", "lo": 0, "hi": 1, "color": "red" },
            "futureField": true
        }"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.extra, Extra::Range { lo: 0, hi: 1 });
        assert!(step.settled.contains(&1));
    }

    #[test]
    fn unknown_extra_type_reads_as_unknown() {
        let json = r#"{
            "kind": "sorting",
            "snapshot": [4.0, 1.0],
            "description": "gap pass",
            "settledPositions": [],
            "extra": { "type": "shell_gap", "gap": 4 }
        }"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.extra, Extra::Unknown);
        assert_eq!(step.array(), Some(&[4.0, 1.0][..]));

        let cbor = crate::io::to_cbor(&serde_json::from_str::<serde_json::Value>(json).unwrap()).unwrap();
        let from_cbor: Step = crate::io::from_cbor(&cbor).unwrap();
        assert_eq!(from_cbor, step);
    }

    #[test]
    fn empty_tree_snapshot_roundtrips_as_null() {
        let step = Step::tree(None, "empty");
        let s = serde_json::to_string(&step).unwrap();
        assert!(s.contains(r#""snapshot":null"#));
        let back: Step = serde_json::from_str(&s).unwrap();
        assert_eq!(back.snapshot, Snapshot::Tree(None));
        assert!(back.snapshot.is_empty());
    }
}
