//! Insertion sort.
//!
//! Index 0 is treated as settled up front (the sorted prefix). For each later
//! key: a select step, one compare-and-shift step per element moved right, a
//! placement step, and a round-complete step extending the prefix.
//!
//! The in-bucket pass of bucket sort reuses [`insertion_sort_events`] so both
//! traces share one granularity.

use algotrace_core::{Extra, Recorder, Step, StepKind};

use crate::trivial_trace;

/// One event of an insertion sort over a slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum InsertionEvent {
    /// `key` lifted from `index`.
    Select { index: usize, key: f64 },
    /// Element moved from `from` to `from + 1` because it exceeds `key`.
    Shift { from: usize, key: f64 },
    /// `key` written at `index`.
    Place { index: usize, key: f64 },
    /// Prefix `0..=index` is ordered.
    RoundDone { index: usize },
}

/// Sort `arr` in place, calling `emit` after each event with the array state.
pub(crate) fn insertion_sort_events<F>(arr: &mut [f64], mut emit: F)
where
    F: FnMut(&[f64], InsertionEvent),
{
    for i in 1..arr.len() {
        let key = arr[i];
        emit(arr, InsertionEvent::Select { index: i, key });
        let mut j = i;
        while j > 0 && arr[j - 1] > key {
            arr[j] = arr[j - 1];
            emit(arr, InsertionEvent::Shift { from: j - 1, key });
            j -= 1;
        }
        arr[j] = key;
        emit(arr, InsertionEvent::Place { index: j, key });
        emit(arr, InsertionEvent::RoundDone { index: i });
    }
}

/// Record an insertion sort of `values`.
#[must_use]
pub fn generate_insertion_sort_steps(values: &[f64]) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.settle(0);
    rec.record(Step::sorting(&arr, "Initial array; the first element forms the sorted prefix"));

    let mut round = 0usize;
    insertion_sort_events(&mut arr, |a, ev| match ev {
        InsertionEvent::Select { index, key } => {
            round = index;
            rec.record(
                Step::sorting(a, format!("Select key {key} at index {index}"))
                    .primary(index)
                    .with_extra(Extra::Insertion { key, round }),
            );
        }
        InsertionEvent::Shift { from, key } => {
            rec.record(
                Step::sorting(a, format!("{} > {key}: shift it right", a[from + 1]))
                    .primary(from)
                    .secondary(from + 1)
                    .with_extra(Extra::Insertion { key, round }),
            );
        }
        InsertionEvent::Place { index, key } => {
            rec.record(
                Step::sorting(a, format!("Place key {key} at index {index}"))
                    .primary(index)
                    .with_extra(Extra::Insertion { key, round }),
            );
        }
        InsertionEvent::RoundDone { index } => {
            rec.settle_range(0..index + 1);
            rec.record(Step::sorting(a, format!("Indices 0..={index} are in order")).primary(index));
        }
    });

    rec.finish()
}
