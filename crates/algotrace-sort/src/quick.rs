//! Quicksort with Lomuto partitioning (last element as pivot).
//!
//! Events: pivot selection, one comparison per scanned element, a swap step
//! for each element moved below the pivot, and the final pivot placement,
//! which settles the pivot index. Singleton ranges are settled directly.
//! Quicksort is not stable.

use algotrace_core::{Extra, Recorder, Step, StepKind};

use crate::trivial_trace;

/// Record a quicksort of `values`.
#[must_use]
pub fn generate_quick_sort_steps(values: &[f64]) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.record(Step::sorting(&arr, "Initial array"));

    let hi = arr.len() - 1;
    sort_range(&mut arr, 0, hi, &mut rec);

    rec.finish()
}

fn sort_range(arr: &mut [f64], lo: usize, hi: usize, rec: &mut Recorder) {
    match lo.cmp(&hi) {
        std::cmp::Ordering::Less => {
            let p = partition(arr, lo, hi, rec);
            if p > lo {
                sort_range(arr, lo, p - 1, rec);
            }
            sort_range(arr, p + 1, hi, rec);
        }
        std::cmp::Ordering::Equal => {
            rec.settle(lo);
            rec.record(
                Step::sorting(arr, format!("{} is alone in its range and is in place", arr[lo]))
                    .primary(lo),
            );
        }
        std::cmp::Ordering::Greater => {}
    }
}

/// Lomuto partition of `[lo, hi]`; returns the pivot's final index.
fn partition(arr: &mut [f64], lo: usize, hi: usize, rec: &mut Recorder) -> usize {
    let pivot = arr[hi];
    // `store` is the next slot for an element below the pivot.
    let mut store = lo;
    let extra = |pivot_index, store: usize| Extra::Partition {
        lo,
        hi,
        pivot_index,
        pivot,
        boundary: store.checked_sub(1).filter(|&b| b >= lo),
    };

    rec.record(
        Step::sorting(arr, format!("Choose pivot {pivot} (last element of [{lo}..={hi}])"))
            .primary(hi)
            .with_extra(extra(hi, store)),
    );

    for j in lo..hi {
        rec.record(
            Step::sorting(arr, format!("Compare {} with pivot {pivot}", arr[j]))
                .primary(j)
                .secondary(hi)
                .with_extra(extra(hi, store)),
        );
        if arr[j] < pivot {
            arr.swap(store, j);
            rec.record(
                Step::sorting(arr, format!("{} < {pivot}: swap indices {store} and {j}", arr[store]))
                    .primary(store)
                    .secondary(j)
                    .with_extra(extra(hi, store + 1)),
            );
            store += 1;
        }
    }

    arr.swap(store, hi);
    rec.settle(store);
    rec.record(
        Step::sorting(arr, format!("Place pivot {pivot} at index {store}"))
            .primary(store)
            .secondary(hi)
            .with_extra(extra(store, store)),
    );
    store
}
