//! Counting sort over a bounded integer range.
//!
//! Phases (each step carries an independent copy of the counting and output
//! arrays):
//! 1) count: one step per input element tallied,
//! 2) accumulate: one step per prefix-sum entry,
//! 3) place: back-to-front fill of the output (stable), one step per element,
//! 4) copy back: one step per index written into the working array, which
//!    settles that index.
//!
//! Inputs that are not finite integers, or whose range exceeds
//! `TraceConfig::max_counting_range`, yield a single `NotApplicable` step.

use algotrace_core::{CountingPhase, Extra, Recorder, Step, StepKind, TraceConfig};

use crate::trivial_trace;

/// Record a counting sort of `values` with default configuration.
#[must_use]
pub fn generate_counting_sort_steps(values: &[f64]) -> Vec<Step> {
    generate_counting_sort_steps_with(values, &TraceConfig::default())
}

/// Record a counting sort of `values`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn generate_counting_sort_steps_with(values: &[f64], cfg: &TraceConfig) -> Vec<Step> {
    if let Some(steps) = trivial_trace(values) {
        return steps;
    }
    let (min, max) = match integer_bounds(values) {
        Ok(bounds) => bounds,
        Err(reason) => return not_applicable(values, reason),
    };
    let range = max.abs_diff(min).saturating_add(1);
    if range > cfg.max_counting_range as u64 {
        return not_applicable(
            values,
            format!("value range {range} exceeds the counting limit {}", cfg.max_counting_range),
        );
    }

    let mut arr = values.to_vec();
    let n = arr.len();
    let slot = |v: f64| (v as i64 - min) as usize;
    let mut counts = vec![0usize; range as usize];
    let mut output: Vec<Option<f64>> = vec![None; n];
    let mut rec = Recorder::new(StepKind::Sorting);
    let extra = |phase, counts: &[usize], output: &[Option<f64>], focus| Extra::Counting {
        phase,
        min,
        counts: counts.to_vec(),
        output: output.to_vec(),
        focus,
    };

    rec.record(
        Step::sorting(&arr, format!("Initial array; counting values in [{min}, {max}]"))
            .with_extra(extra(CountingPhase::Count, &counts, &output, None)),
    );

    for (i, &v) in arr.iter().enumerate() {
        let s = slot(v);
        counts[s] += 1;
        rec.record(
            Step::sorting(&arr, format!("Count {v}: count[{s}] = {}", counts[s]))
                .primary(i)
                .with_extra(extra(CountingPhase::Count, &counts, &output, Some(s))),
        );
    }

    for s in 1..counts.len() {
        counts[s] += counts[s - 1];
        rec.record(
            Step::sorting(&arr, format!("Accumulate: count[{s}] = {}", counts[s]))
                .with_extra(extra(CountingPhase::Accumulate, &counts, &output, Some(s))),
        );
    }

    for i in (0..n).rev() {
        let v = arr[i];
        let s = slot(v);
        counts[s] -= 1;
        let pos = counts[s];
        output[pos] = Some(v);
        rec.record(
            Step::sorting(&arr, format!("Place {v} at output index {pos}"))
                .primary(i)
                .with_extra(extra(CountingPhase::Place, &counts, &output, Some(s))),
        );
    }

    for (i, v) in output.iter().enumerate() {
        if let Some(v) = *v {
            arr[i] = v;
        }
        rec.settle(i);
        rec.record(
            Step::sorting(&arr, format!("Copy {} back to index {i}", arr[i]))
                .primary(i)
                .with_extra(extra(CountingPhase::CopyBack, &counts, &output, None)),
        );
    }

    rec.finish()
}

/// `(min, max)` of `values` when every value is a finite integer.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn integer_bounds(values: &[f64]) -> Result<(i64, i64), String> {
    // Beyond 2^53 not every integer is representable.
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    let mut bounds: Option<(i64, i64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() || v.fract() != 0.0 || v.abs() > LIMIT {
            return Err(format!("value {v} at index {i} is not an integer"));
        }
        let x = v as i64;
        bounds = Some(bounds.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
    }
    bounds.ok_or_else(|| "input is empty".to_string())
}

/// Single fallback step for inputs outside the algorithm's domain.
pub(crate) fn not_applicable(values: &[f64], reason: String) -> Vec<Step> {
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.record(
        Step::sorting(values, format!("Not applicable: {reason}"))
            .with_extra(Extra::NotApplicable { reason }),
    );
    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(step: &Step) -> Option<(CountingPhase, &[usize])> {
        match &step.extra {
            Extra::Counting { phase, counts, .. } => Some((*phase, counts)),
            _ => None,
        }
    }

    #[test]
    fn sorts_negative_integers() {
        let steps = generate_counting_sort_steps(&[3.0, -2.0, 0.0, 3.0, -1.0]);
        assert_eq!(
            steps.last().unwrap().array(),
            Some(&[-2.0, -1.0, 0.0, 3.0, 3.0][..])
        );
    }

    #[test]
    fn accumulate_phase_reaches_input_length() {
        let input = [4.0, 1.0, 3.0, 4.0, 2.0, 1.0];
        let steps = generate_counting_sort_steps(&input);
        let acc: Vec<_> = steps
            .iter()
            .filter_map(counts_of)
            .filter(|(p, _)| *p == CountingPhase::Accumulate)
            .collect();
        assert_eq!(acc.len(), 3);
        assert_eq!(*acc.last().unwrap().1.last().unwrap(), input.len());
    }

    #[test]
    fn non_integers_fall_back() {
        let steps = generate_counting_sort_steps(&[1.5, 2.0]);
        assert_eq!(steps.len(), 1);
        assert!(matches!(steps[0].extra, Extra::NotApplicable { .. }));
        assert_eq!(steps[0].array(), Some(&[1.5, 2.0][..]));
    }

    #[test]
    fn wide_range_falls_back() {
        let cfg = TraceConfig { max_counting_range: 10, ..TraceConfig::default() };
        let steps = generate_counting_sort_steps_with(&[0.0, 100.0], &cfg);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].description.contains("exceeds"));
    }

    #[test]
    fn copy_back_settles_in_order() {
        let steps = generate_counting_sort_steps(&[2.0, 1.0, 2.0]);
        let copies: Vec<_> = steps
            .iter()
            .filter(|s| s.description.starts_with("Copy"))
            .collect();
        assert_eq!(copies.len(), 3);
        for (i, s) in copies.iter().enumerate() {
            assert_eq!(s.settled.len(), i + 1);
        }
    }
}
