//! Bucket sort.
//!
//! `min(n, max_buckets)` buckets split `[min, max]` evenly; an element goes
//! to `floor((v - min) / width)`, clamped to the last bucket. Each bucket is
//! then insertion-sorted with the same step granularity as insertion sort,
//! and the buckets are concatenated back, one step (and one settled index)
//! per element written.

use algotrace_core::{BucketPhase, Extra, Recorder, Step, StepKind, TraceConfig};

use crate::counting::not_applicable;
use crate::insertion::{insertion_sort_events, InsertionEvent};
use crate::trivial_trace;

/// Record a bucket sort of `values` with default configuration.
#[must_use]
pub fn generate_bucket_sort_steps(values: &[f64]) -> Vec<Step> {
    generate_bucket_sort_steps_with(values, &TraceConfig::default())
}

/// Record a bucket sort of `values`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn generate_bucket_sort_steps_with(values: &[f64], cfg: &TraceConfig) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return not_applicable(values, format!("value {} at index {i} is not finite", values[i]));
    }

    let mut arr = values.to_vec();
    let n = arr.len();
    let min = arr.iter().copied().fold(f64::INFINITY, f64::min);
    let max = arr.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let count = n.min(cfg.max_buckets).max(1);
    let width = (max - min) / count as f64;
    let bucket_of = |v: f64| {
        if width > 0.0 {
            (((v - min) / width).floor() as usize).min(count - 1)
        } else {
            0
        }
    };

    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); count];
    let mut rec = Recorder::new(StepKind::Sorting);
    let extra = |phase, buckets: &[Vec<f64>], active, focus, compare| Extra::Buckets {
        phase,
        buckets: buckets.to_vec(),
        active_bucket: active,
        focus,
        compare,
    };

    rec.record(
        Step::sorting(&arr, format!("Initial array; {count} buckets of width {width} from {min}"))
            .with_extra(extra(BucketPhase::Distribute, &buckets, None, None, None)),
    );

    for (i, &v) in arr.iter().enumerate() {
        let b = bucket_of(v);
        buckets[b].push(v);
        rec.record(
            Step::sorting(&arr, format!("Put {v} into bucket {b}"))
                .primary(i)
                .with_extra(extra(
                    BucketPhase::Distribute,
                    &buckets,
                    Some(b),
                    Some(buckets[b].len() - 1),
                    None,
                )),
        );
    }
    rec.record(
        Step::sorting(&arr, "All elements distributed")
            .with_extra(extra(BucketPhase::Distributed, &buckets, None, None, None)),
    );

    for b in 0..count {
        if buckets[b].len() < 2 {
            continue;
        }
        let mut bucket = std::mem::take(&mut buckets[b]);
        rec.record(
            Step::sorting(&arr, format!("Sort bucket {b} with insertion sort"))
                .with_extra(extra(BucketPhase::SortBucket, &with_slot(&buckets, b, &bucket), Some(b), None, None)),
        );
        insertion_sort_events(&mut bucket, |cur, ev| {
            let view = with_slot(&buckets, b, cur);
            let (desc, focus, compare) = match ev {
                InsertionEvent::Select { index, key } => {
                    (format!("Bucket {b}: select key {key}"), Some(index), None)
                }
                InsertionEvent::Shift { from, key } => (
                    format!("Bucket {b}: {} > {key}, shift it right", cur[from + 1]),
                    Some(from),
                    Some(from + 1),
                ),
                InsertionEvent::Place { index, key } => {
                    (format!("Bucket {b}: place key {key} at position {index}"), Some(index), None)
                }
                InsertionEvent::RoundDone { index } => {
                    (format!("Bucket {b}: positions 0..={index} are in order"), Some(index), None)
                }
            };
            rec.record(
                Step::sorting(&arr, desc)
                    .with_extra(extra(BucketPhase::SortBucket, &view, Some(b), focus, compare)),
            );
        });
        buckets[b] = bucket;
    }

    let mut k = 0usize;
    for (b, bucket) in buckets.iter().enumerate() {
        for (pos, &v) in bucket.iter().enumerate() {
            arr[k] = v;
            rec.settle(k);
            rec.record(
                Step::sorting(&arr, format!("Write {v} from bucket {b} to index {k}"))
                    .primary(k)
                    .with_extra(extra(BucketPhase::Collect, &buckets, Some(b), Some(pos), None)),
            );
            k += 1;
        }
    }

    rec.finish()
}

/// Copy of `buckets` with slot `b` replaced by `contents`.
fn with_slot(buckets: &[Vec<f64>], b: usize, contents: &[f64]) -> Vec<Vec<f64>> {
    let mut view = buckets.to_vec();
    view[b] = contents.to_vec();
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets_of(step: &Step) -> Option<&[Vec<f64>]> {
        match &step.extra {
            Extra::Buckets { buckets, .. } => Some(buckets),
            _ => None,
        }
    }

    #[test]
    fn sorts_reals() {
        let steps = generate_bucket_sort_steps(&[0.42, 0.32, 0.23, 0.52, 0.25, 0.47, 0.51]);
        assert_eq!(
            steps.last().unwrap().array(),
            Some(&[0.23, 0.25, 0.32, 0.42, 0.47, 0.51, 0.52][..])
        );
    }

    #[test]
    fn max_value_lands_in_last_bucket() {
        let steps = generate_bucket_sort_steps(&[0.0, 5.0, 10.0]);
        let dist = steps.iter().find(|s| s.description == "All elements distributed").unwrap();
        let b = buckets_of(dist).unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b[2], vec![10.0]);
    }

    #[test]
    fn equal_values_share_bucket_zero() {
        let steps = generate_bucket_sort_steps(&[7.0, 7.0, 7.0]);
        let dist = steps.iter().find(|s| s.description == "All elements distributed").unwrap();
        assert_eq!(buckets_of(dist).unwrap()[0].len(), 3);
        assert_eq!(steps.last().unwrap().array(), Some(&[7.0, 7.0, 7.0][..]));
    }

    #[test]
    fn bucket_count_is_capped() {
        let input: Vec<f64> = (0..25).rev().map(f64::from).collect();
        let steps = generate_bucket_sort_steps(&input);
        assert_eq!(buckets_of(&steps[0]).unwrap().len(), 10);
    }

    #[test]
    fn distributed_buckets_are_a_permutation_of_the_array() {
        let input = [9.0, 1.0, 5.0, 3.0, 3.0, 8.0];
        let steps = generate_bucket_sort_steps(&input);
        let dist = steps.iter().find(|s| s.description == "All elements distributed").unwrap();
        let mut flat: Vec<f64> = buckets_of(dist).unwrap().concat();
        let mut arr = dist.array().unwrap().to_vec();
        flat.sort_by(f64::total_cmp);
        arr.sort_by(f64::total_cmp);
        assert_eq!(flat, arr);
    }
}
