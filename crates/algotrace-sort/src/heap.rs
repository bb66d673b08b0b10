//! Heapsort over an implicit max-heap.
//!
//! Build phase: `heapify` from the last non-leaf down to the root. `heapify`
//! records an inspect step, one comparison per child that exists, a step each
//! time a child becomes the new largest, then either a swap (and recursion
//! into the child) or an "already valid" step. Sort phase: swap the root with
//! the last unsettled slot, settle that slot, and re-heapify the shrunk heap.
//! The final swap leaves a one-element heap, so it settles index 0 as well.
//! Heapsort is not stable.

use algotrace_core::{Extra, Recorder, Step, StepKind};

use crate::trivial_trace;

/// Record a heapsort of `values`.
#[must_use]
pub fn generate_heap_sort_steps(values: &[f64]) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.record(Step::sorting(&arr, "Initial array"));

    for i in (0..n / 2).rev() {
        heapify(&mut arr, n, i, &mut rec);
    }
    rec.record(Step::sorting(&arr, "Max-heap built").with_extra(Extra::Range { lo: 0, hi: n - 1 }));

    for end in (1..n).rev() {
        arr.swap(0, end);
        rec.settle(end);
        let mut desc = format!("Move max {} to index {end}", arr[end]);
        if end == 1 {
            // A one-element heap is already in place.
            rec.settle(0);
            desc.push_str(&format!("; {} at index 0 is the minimum", arr[0]));
        }
        rec.record(Step::sorting(&arr, desc).primary(0).secondary(end));
        if end > 1 {
            heapify(&mut arr, end, 0, &mut rec);
        }
    }

    rec.finish()
}

/// Restore the max-heap property for the subtree rooted at `node` within
/// the first `heap_size` elements.
fn heapify(arr: &mut [f64], heap_size: usize, node: usize, rec: &mut Recorder) {
    let mut node = node;
    loop {
        let left = Some(2 * node + 1).filter(|&c| c < heap_size);
        let right = Some(2 * node + 2).filter(|&c| c < heap_size);
        let extra = |largest| Extra::Heap { node, left, right, largest, heap_size };
        let mut largest = node;

        rec.record(
            Step::sorting(arr, format!("Inspect children of index {node} ({})", arr[node]))
                .primary(node)
                .with_extra(extra(largest)),
        );

        for child in [left, right].into_iter().flatten() {
            rec.record(
                Step::sorting(arr, format!("Compare child {} with largest {}", arr[child], arr[largest]))
                    .primary(child)
                    .secondary(largest)
                    .with_extra(extra(largest)),
            );
            if arr[child] > arr[largest] {
                largest = child;
                rec.record(
                    Step::sorting(arr, format!("{} at index {child} is the new largest", arr[child]))
                        .primary(child)
                        .with_extra(extra(largest)),
                );
            }
        }

        if largest == node {
            rec.record(
                Step::sorting(arr, format!("Heap property holds at index {node}"))
                    .primary(node)
                    .with_extra(extra(largest)),
            );
            return;
        }

        arr.swap(node, largest);
        rec.record(
            Step::sorting(arr, format!("Swap index {node} with index {largest} and continue"))
                .primary(node)
                .secondary(largest)
                .with_extra(extra(largest)),
        );
        node = largest;
    }
}
