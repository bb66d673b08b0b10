//! Bubble sort.
//!
//! Events: one step per adjacent comparison, one per swap, one per completed
//! pass (settling the largest unsettled index), then a closing step that
//! settles index 0 once all `n - 1` passes are done. There is no early exit
//! on a swap-free pass.

use algotrace_core::{Extra, Recorder, Step, StepKind};

use crate::trivial_trace;

/// Record a bubble sort of `values`.
#[must_use]
pub fn generate_bubble_sort_steps(values: &[f64]) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.record(Step::sorting(&arr, "Initial array"));

    for pass in 0..n - 1 {
        let end = n - 1 - pass;
        for j in 0..end {
            rec.record(
                Step::sorting(&arr, format!("Compare {} and {}", arr[j], arr[j + 1]))
                    .primary(j)
                    .secondary(j + 1)
                    .with_extra(Extra::Range { lo: 0, hi: end }),
            );
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                rec.record(
                    Step::sorting(&arr, format!("Swap {} and {}", arr[j + 1], arr[j]))
                        .primary(j)
                        .secondary(j + 1)
                        .with_extra(Extra::Range { lo: 0, hi: end }),
                );
            }
        }
        rec.settle(end);
        rec.record(
            Step::sorting(
                &arr,
                format!("Pass {} complete: {} is in its final position", pass + 1, arr[end]),
            )
            .primary(end),
        );
    }

    rec.settle(0);
    rec.record(
        Step::sorting(&arr, format!("All passes complete: {} is in its final position", arr[0]))
            .primary(0),
    );
    rec.finish()
}
