//! LSD radix sort over decimal digits.
//!
//! The number of passes is the decimal length of the maximum value, fixed
//! before the first pass. Each pass assigns every element to digit bucket
//! `0..=9` (one step each), records the distributed state, then drains the
//! buckets in ascending order with one step per extraction and one per
//! placement into the working array. Placements of the last pass settle
//! their index.
//!
//! Only non-negative integers are accepted; anything else yields a single
//! `NotApplicable` step.

use algotrace_core::{BucketPhase, Extra, Recorder, Step, StepKind};

use crate::counting::{integer_bounds, not_applicable};
use crate::trivial_trace;

const RADIX: u64 = 10;

/// Record a radix sort of `values`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn generate_radix_sort_steps(values: &[f64]) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    let max = match integer_bounds(values) {
        Ok((min, _)) if min < 0 => {
            return not_applicable(values, format!("negative value {min} in input"));
        }
        Ok((_, max)) => max as u64,
        Err(reason) => return not_applicable(values, reason),
    };

    let passes = digit_count(max);
    let mut arr = values.to_vec();
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.record(Step::sorting(
        &arr,
        format!("Initial array; max {max} has {passes} digit(s)"),
    ));

    let mut place = 1u64;
    for pass in 0..passes {
        let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); RADIX as usize];
        let extra = |phase, buckets: &[Vec<f64>], active| Extra::Radix {
            phase,
            pass,
            passes,
            place,
            buckets: buckets.to_vec(),
            active_bucket: active,
        };

        for (i, &v) in arr.iter().enumerate() {
            let d = ((v as u64 / place) % RADIX) as usize;
            buckets[d].push(v);
            rec.record(
                Step::sorting(&arr, format!("Pass {}: digit of {v} at place {place} is {d}", pass + 1))
                    .primary(i)
                    .with_extra(extra(BucketPhase::Distribute, &buckets, Some(d))),
            );
        }
        rec.record(
            Step::sorting(&arr, format!("Pass {}: all elements distributed", pass + 1))
                .with_extra(extra(BucketPhase::Distributed, &buckets, None)),
        );

        let mut k = 0usize;
        for d in 0..buckets.len() {
            while !buckets[d].is_empty() {
                let v = buckets[d].remove(0);
                rec.record(
                    Step::sorting(&arr, format!("Take {v} from bucket {d}"))
                        .with_extra(extra(BucketPhase::Extract, &buckets, Some(d))),
                );
                arr[k] = v;
                // Writes of the last pass are final.
                if pass + 1 == passes {
                    rec.settle(k);
                }
                rec.record(
                    Step::sorting(&arr, format!("Write {v} to index {k}"))
                        .primary(k)
                        .with_extra(extra(BucketPhase::Collect, &buckets, Some(d))),
                );
                k += 1;
            }
        }

        place = place.saturating_mul(RADIX);
    }

    rec.finish()
}

/// Decimal digit count of `max`, taken from its string form (0 has one digit).
fn digit_count(max: u64) -> usize {
    max.to_string().len()
}
