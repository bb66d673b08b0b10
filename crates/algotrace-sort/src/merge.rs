//! Top-down merge sort.
//!
//! `sort_range` splits `[lo, hi]` at `(lo + hi) / 2`, recording a split step
//! before recursing. `merge` copies the window into an auxiliary buffer,
//! then records one step per comparison and one per placement (ties take the
//! left element), drains whichever side remains, and records a completion
//! step. Only the completion of the whole array settles indices.

use algotrace_core::{Extra, Recorder, Step, StepKind};

use crate::trivial_trace;

/// Record a merge sort of `values`.
#[must_use]
pub fn generate_merge_sort_steps(values: &[f64]) -> Vec<Step> {
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
    if lo >= hi {
        return;
    }
    let mid = (lo + hi) / 2;
    rec.record(
        Step::sorting(arr, format!("Split [{lo}..={hi}] into [{lo}..={mid}] and [{}..={hi}]", mid + 1))
            .primary(lo)
            .secondary(hi)
            .with_extra(Extra::Merge { lo, mid, hi, aux: Vec::new() }),
    );
    sort_range(arr, lo, mid, rec);
    sort_range(arr, mid + 1, hi, rec);
    merge(arr, lo, mid, hi, rec);
}

fn merge(arr: &mut [f64], lo: usize, mid: usize, hi: usize, rec: &mut Recorder) {
    let aux = arr[lo..=hi].to_vec();
    let extra = |aux: &[f64]| Extra::Merge { lo, mid, hi, aux: aux.to_vec() };
    let left_len = mid - lo + 1;

    // i, j index into `aux`; k into `arr`.
    let (mut i, mut j, mut k) = (0usize, left_len, lo);
    while i < left_len && j < aux.len() {
        rec.record(
            Step::sorting(arr, format!("Compare {} (left) with {} (right)", aux[i], aux[j]))
                .primary(lo + i)
                .secondary(lo + j)
                .with_extra(extra(&aux)),
        );
        let (value, side) = if aux[i] <= aux[j] {
            i += 1;
            (aux[i - 1], "left")
        } else {
            j += 1;
            (aux[j - 1], "right")
        };
        arr[k] = value;
        rec.record(
            Step::sorting(arr, format!("Place {value} from the {side} half at index {k}"))
                .primary(k)
                .with_extra(extra(&aux)),
        );
        k += 1;
    }

    for (rest, side) in [(i..left_len, "left"), (j..aux.len(), "right")] {
        for idx in rest {
            arr[k] = aux[idx];
            rec.record(
                Step::sorting(arr, format!("Copy remaining {} from the {side} half to index {k}", aux[idx]))
                    .primary(k)
                    .with_extra(extra(&aux)),
            );
            k += 1;
        }
    }

    if lo == 0 && hi == arr.len() - 1 {
        rec.settle_range(lo..hi + 1);
    }
    rec.record(
        Step::sorting(arr, format!("Merged [{lo}..={hi}]"))
            .with_extra(Extra::Range { lo, hi }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_only_settles_at_full_merge() {
        let steps = generate_merge_sort_steps(&[5.0, 2.0, 4.0, 6.0, 1.0, 3.0]);
        assert_eq!(steps.last().unwrap().array(), Some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0][..]));
        let first_settled = steps.iter().position(|s| !s.settled.is_empty()).unwrap();
        assert_eq!(steps[first_settled].description, "Merged [0..=5]");
        assert_eq!(steps[first_settled].settled.len(), 6);
    }

    #[test]
    fn split_uses_floor_midpoint() {
        let steps = generate_merge_sort_steps(&[3.0, 2.0, 1.0]);
        assert_eq!(steps[1].description, "Split [0..=2] into [0..=1] and [2..=2]");
    }

    #[test]
    fn ties_prefer_left() {
        let steps = generate_merge_sort_steps(&[1.0, 1.0]);
        let place = steps.iter().find(|s| s.description.starts_with("Place")).unwrap();
        assert!(place.description.contains("left"));
    }
}
