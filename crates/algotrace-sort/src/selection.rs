//! Selection sort.
//!
//! Per round: a start step, one comparison per scanned element against the
//! running minimum, a step for each new minimum, exactly one swap step (a
//! no-op when the minimum is already in place), and a round-complete step.

use algotrace_core::{Extra, Recorder, Step, StepKind};

use crate::trivial_trace;

/// Record a selection sort of `values`.
#[must_use]
pub fn generate_selection_sort_steps(values: &[f64]) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.record(Step::sorting(&arr, "Initial array"));

    for round in 0..n - 1 {
        let mut min = round;
        let state = |min_index| Extra::Selection { round, min_index };

        rec.record(
            Step::sorting(&arr, format!("Round {}: searching for the minimum from index {round}", round + 1))
                .primary(round)
                .with_extra(state(min)),
        );

        for j in round + 1..n {
            rec.record(
                Step::sorting(&arr, format!("Compare {} with current minimum {}", arr[j], arr[min]))
                    .primary(j)
                    .secondary(min)
                    .with_extra(state(min)),
            );
            if arr[j] < arr[min] {
                min = j;
                rec.record(
                    Step::sorting(&arr, format!("New minimum {} at index {j}", arr[j]))
                        .primary(j)
                        .with_extra(state(min)),
                );
            }
        }

        let desc = if min == round {
            format!("{} is already in position {round}", arr[round])
        } else {
            arr.swap(round, min);
            format!("Swap {} into position {round}", arr[round])
        };
        rec.record(
            Step::sorting(&arr, desc)
                .primary(round)
                .secondary(min)
                .with_extra(state(min)),
        );

        rec.settle(round);
        // The last round also fixes the final index.
        if round == n - 2 {
            rec.settle(n - 1);
        }
        rec.record(
            Step::sorting(&arr, format!("Round {} complete", round + 1))
                .primary(round)
                .with_extra(state(round)),
        );
    }

    rec.finish()
}
