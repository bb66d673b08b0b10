//! Per-call step accumulator.
//!
//! A `Recorder` is owned by exactly one generator invocation and threaded by
//! `&mut` through its helpers. It holds the growing trace and the settled
//! set, and stamps the current settled set into every recorded step, so the
//! settled sets in a finished trace are non-decreasing by construction.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::step::{Step, StepKind};

/// Accumulates steps and settled positions for a single generator call.
#[derive(Debug, Clone)]
pub struct Recorder {
    kind: StepKind,
    steps: Vec<Step>,
    settled: BTreeSet<usize>,
}

impl Recorder {
    /// Empty recorder for steps of `kind`.
    #[must_use]
    pub const fn new(kind: StepKind) -> Self {
        Self {
            kind,
            steps: Vec::new(),
            settled: BTreeSet::new(),
        }
    }

    /// Append `step`, overwriting its settled set with the current one.
    pub fn record(&mut self, mut step: Step) {
        debug_assert_eq!(step.kind, self.kind, "step kind does not match recorder");
        step.settled.clone_from(&self.settled);
        self.steps.push(step);
    }

    /// Mark `index` as settled for all subsequent steps.
    #[inline]
    pub fn settle(&mut self, index: usize) {
        self.settled.insert(index);
    }

    /// Mark every index in `range` as settled.
    #[inline]
    pub fn settle_range(&mut self, range: Range<usize>) {
        self.settled.extend(range);
    }

    /// Whether `index` is already settled.
    #[inline]
    #[must_use]
    pub fn is_settled(&self, index: usize) -> bool {
        self.settled.contains(&index)
    }

    /// Current settled set.
    #[inline]
    #[must_use]
    pub const fn settled(&self) -> &BTreeSet<usize> {
        &self.settled
    }

    /// Number of steps recorded so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Kind of steps this recorder accepts.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        self.kind
    }

    /// Consume the recorder and return the trace.
    #[must_use]
    pub fn finish(self) -> Vec<Step> {
        self.steps
    }
}
