//! Trace validation.
//!
//! - [`TraceChecker`]: fallible validator returning a [`TraceSummary`]
//! - [`CheckConfig`]: knobs for which end-state claims are enforced
//!
//! A trace is accepted when:
//!   - it is non-empty and every step has the same `kind`,
//!   - sorting snapshots keep the working array length and indices stay in bounds,
//!   - settled sets never shrink from one step to the next,
//!   - each snapshot has the shape its `kind` names,
//!   - the last step's settled set is the full index range of a sorting
//!     trace, or covers every id present in the final tree (ids of deleted
//!     nodes stay settled),
//!   - optionally, the final array is ascending and a permutation of the input.
//!
//! A single `NotApplicable` step is the documented fallback for inputs outside
//! an algorithm's domain and is accepted as-is.

use crate::step::{Extra, Snapshot, Step, StepKind};
use anyhow::{bail, ensure, Result};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Optional knobs for checking; extend as needed.
#[derive(Debug, Clone, Copy)]
pub struct CheckConfig {
    /// If true, the final sorting snapshot must be ascending.
    pub require_sorted: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { require_sorted: true }
    }
}

/// What a successful check observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSummary {
    /// Step kind shared by the whole trace.
    pub kind: StepKind,
    /// Number of steps.
    pub steps: usize,
    /// Size of the final settled set.
    pub settled: usize,
    /// Whether the trace is a single not-applicable fallback step.
    pub fallback: bool,
}

/// Fallible trace validator.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceChecker {
    /// Configuration toggles for checking behavior.
    pub cfg: CheckConfig,
}

impl TraceChecker {
    /// Checker with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checker with explicit configuration.
    #[must_use]
    pub const fn with_config(cfg: CheckConfig) -> Self {
        Self { cfg }
    }

    /// Validate `steps`. When `input` is given, sorting traces must end in a
    /// permutation of it.
    ///
    /// # Errors
    /// Returns an error describing the first violated property.
    pub fn check(&self, steps: &[Step], input: Option<&[f64]>) -> Result<TraceSummary> {
        let Some(first) = steps.first() else {
            bail!("trace is empty");
        };
        let kind = first.kind;

        if let [only] = steps {
            if matches!(only.extra, Extra::NotApplicable { .. }) {
                return Ok(TraceSummary {
                    kind,
                    steps: 1,
                    settled: only.settled.len(),
                    fallback: true,
                });
            }
        }

        let width = first.snapshot.len();
        let mut prev: Option<&BTreeSet<usize>> = None;

        for (sidx, step) in steps.iter().enumerate() {
            ensure!(
                step.kind == kind,
                "step {}: kind {} differs from trace kind {}",
                sidx,
                step.kind,
                kind
            );
            check_shape(sidx, step, width)?;

            if let Some(p) = prev {
                ensure!(
                    p.is_subset(&step.settled),
                    "step {}: settled positions shrank ({} -> {})",
                    sidx,
                    p.len(),
                    step.settled.len()
                );
            }
            prev = Some(&step.settled);
        }

        let last = &steps[steps.len() - 1];
        match &last.snapshot {
            Snapshot::Array(v) => {
                let domain: BTreeSet<usize> = (0..v.len()).collect();
                ensure!(
                    last.settled == domain,
                    "final step settles {} of {} positions",
                    last.settled.intersection(&domain).count(),
                    domain.len()
                );
            }
            Snapshot::Tree(root) => {
                // Deleted ids stay settled; every live node must be settled too.
                let live = root.as_ref().map(|r| r.ids()).unwrap_or_default();
                let missing = live.iter().filter(|id| !last.settled.contains(id)).count();
                ensure!(
                    missing == 0,
                    "final step leaves {} of {} live nodes unsettled",
                    missing,
                    live.len()
                );
            }
        }

        if let Snapshot::Array(v) = &last.snapshot {
            if self.cfg.require_sorted {
                if let Some(i) = v.windows(2).position(|w| w[0] > w[1]) {
                    bail!("final array is not ascending at index {}: {} > {}", i, v[i], v[i + 1]);
                }
            }
            if let Some(input) = input {
                ensure!(
                    is_permutation(v, input),
                    "final array is not a permutation of the input"
                );
            }
        }

        Ok(TraceSummary {
            kind,
            steps: steps.len(),
            settled: last.settled.len(),
            fallback: false,
        })
    }
}

fn check_shape(sidx: usize, step: &Step, width: usize) -> Result<()> {
    ensure!(
        matches!(
            (step.kind, &step.snapshot),
            (StepKind::Sorting, Snapshot::Array(_)) | (StepKind::Tree, Snapshot::Tree(_))
        ),
        "step {}: {} step carries a {} snapshot",
        sidx,
        step.kind,
        match step.snapshot {
            Snapshot::Array(_) => "array",
            Snapshot::Tree(_) => "tree",
        }
    );
    match &step.snapshot {
        Snapshot::Array(v) => {
            ensure!(
                v.len() == width,
                "step {}: snapshot length {} != initial length {}",
                sidx,
                v.len(),
                width
            );
            for (name, idx) in [("primary", step.primary_index), ("secondary", step.secondary_index)] {
                if let Some(i) = idx {
                    ensure!(i < width, "step {}: {} index {} out of range 0..{}", sidx, name, i, width);
                }
            }
            if let Some(&max) = step.settled.last() {
                ensure!(max < width, "step {}: settled index {} out of range 0..{}", sidx, max, width);
            }
        }
        Snapshot::Tree(root) => {
            for (name, idx) in [("primary", step.primary_index), ("secondary", step.secondary_index)] {
                if let Some(id) = idx {
                    let found = root.as_ref().and_then(|r| r.find_id(id)).is_some();
                    ensure!(found, "step {}: {} node id {} not in tree", sidx, name, id);
                }
            }
        }
    }
    Ok(())
}

fn is_permutation(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let key = |x: &f64, y: &f64| -> Ordering { x.total_cmp(y) };
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(key);
    b.sort_by(key);
    a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits())
}
