//! Instrumented sorting algorithms.
//!
//! Each generator re-implements one classic algorithm on a private working
//! copy of its input and records a [`Step`] at every comparison, swap,
//! placement, bucket assignment, or heap adjustment. The whole trace is
//! computed eagerly and returned; the caller's slice is never mutated.
//!
//! - `bubble`, `selection`, `insertion`: quadratic in-place sorts.
//! - `merge`, `quick`, `heap`: divide-and-conquer and heap-based sorts.
//! - `counting`, `bucket`, `radix`: distribution sorts (counting and radix
//!   need integer domains and fall back to a single explanatory step).
//! - `input`: seeded random inputs and value-list parsing.
//!
//! Inputs of length 0 or 1 produce a single "no sort needed" step whose
//! settled set already covers the range.

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
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]

use std::fmt;
use std::str::FromStr;

use algotrace_core::{Recorder, Step, StepKind, TraceConfig};
use anyhow::{anyhow, Error};
use tracing::debug;

/// Bubble sort.
pub mod bubble;
/// Bucket sort with insertion sort inside each bucket.
pub mod bucket;
/// Counting sort over a bounded integer range.
pub mod counting;
/// Max-heap based heapsort.
pub mod heap;
/// Random and parsed inputs.
pub mod input;
/// Insertion sort.
pub mod insertion;
/// Top-down merge sort.
pub mod merge;
/// Quicksort with Lomuto partitioning.
pub mod quick;
/// LSD radix sort over decimal digits.
pub mod radix;
/// Selection sort.
pub mod selection;

pub use bubble::generate_bubble_sort_steps;
pub use bucket::{generate_bucket_sort_steps, generate_bucket_sort_steps_with};
pub use counting::{generate_counting_sort_steps, generate_counting_sort_steps_with};
pub use heap::generate_heap_sort_steps;
pub use insertion::generate_insertion_sort_steps;
pub use merge::generate_merge_sort_steps;
pub use quick::generate_quick_sort_steps;
pub use radix::generate_radix_sort_steps;
pub use selection::generate_selection_sort_steps;

/// Supported sorting algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Bubble sort.
    Bubble,
    /// Selection sort.
    Selection,
    /// Insertion sort.
    Insertion,
    /// Merge sort.
    Merge,
    /// Quicksort.
    Quick,
    /// Heapsort.
    Heap,
    /// Counting sort.
    Counting,
    /// Bucket sort.
    Bucket,
    /// Radix sort.
    Radix,
}

impl Algorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [Self; 9] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
        Self::Counting,
        Self::Bucket,
        Self::Radix,
    ];

    /// Short lowercase name (`"bubble"`, `"quick"`, …).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::Heap => "heap",
            Self::Counting => "counting",
            Self::Bucket => "bucket",
            Self::Radix => "radix",
        }
    }

    /// Whether equal keys keep their relative order.
    #[must_use]
    pub const fn is_stable(self) -> bool {
        matches!(
            self,
            Self::Bubble | Self::Insertion | Self::Merge | Self::Counting | Self::Bucket | Self::Radix
        )
    }

    /// Whether the algorithm only accepts integer inputs.
    #[must_use]
    pub const fn requires_integers(self) -> bool {
        matches!(self, Self::Counting | Self::Radix)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = lower.strip_suffix("sort").unwrap_or(&lower).trim_end_matches(['-', '_', ' ']);
        Self::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| anyhow!("unknown algorithm: {s} (expected one of {})", names().join(", ")))
    }
}

fn names() -> Vec<&'static str> {
    Algorithm::ALL.iter().map(|a| a.name()).collect()
}

/// Run `algorithm` over `values` with default configuration.
#[must_use]
pub fn generate(algorithm: Algorithm, values: &[f64]) -> Vec<Step> {
    generate_with(algorithm, values, &TraceConfig::default())
}

/// Run `algorithm` over `values` with explicit configuration.
#[must_use]
pub fn generate_with(algorithm: Algorithm, values: &[f64], cfg: &TraceConfig) -> Vec<Step> {
    let steps = match algorithm {
        Algorithm::Bubble => generate_bubble_sort_steps(values),
        Algorithm::Selection => generate_selection_sort_steps(values),
        Algorithm::Insertion => generate_insertion_sort_steps(values),
        Algorithm::Merge => generate_merge_sort_steps(values),
        Algorithm::Quick => generate_quick_sort_steps(values),
        Algorithm::Heap => generate_heap_sort_steps(values),
        Algorithm::Counting => generate_counting_sort_steps_with(values, cfg),
        Algorithm::Bucket => generate_bucket_sort_steps_with(values, cfg),
        Algorithm::Radix => generate_radix_sort_steps(values),
    };
    debug!(algorithm = %algorithm, n = values.len(), steps = steps.len(), "generated trace");
    steps
}

/// Single-step trace for inputs that need no sorting (length 0 or 1).
pub(crate) fn trivial_trace(values: &[f64]) -> Option<Vec<Step>> {
    if values.len() > 1 {
        return None;
    }
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.settle_range(0..values.len());
    let what = if values.is_empty() { "Array is empty" } else { "Array has a single element" };
    rec.record(Step::sorting(values, format!("{what}; no sort needed")));
    Some(rec.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("bubble".parse::<Algorithm>().unwrap(), Algorithm::Bubble);
        assert_eq!("QuickSort".parse::<Algorithm>().unwrap(), Algorithm::Quick);
        assert_eq!("merge-sort".parse::<Algorithm>().unwrap(), Algorithm::Merge);
        assert!("bogo".parse::<Algorithm>().is_err());
    }

    #[test]
    fn stability_claims_exclude_quick_and_heap() {
        assert!(!Algorithm::Quick.is_stable());
        assert!(!Algorithm::Heap.is_stable());
        assert!(!Algorithm::Selection.is_stable());
        assert!(Algorithm::Merge.is_stable());
    }

    #[test]
    fn trivial_inputs_produce_one_settled_step() {
        for alg in Algorithm::ALL {
            let empty = generate(alg, &[]);
            assert_eq!(empty.len(), 1, "{alg}");
            assert!(empty[0].settled.is_empty());

            let one = generate(alg, &[7.0]);
            assert_eq!(one.len(), 1, "{alg}");
            assert!(one[0].settled.contains(&0));
            assert!(one[0].description.contains("no sort needed"));
        }
    }
}
