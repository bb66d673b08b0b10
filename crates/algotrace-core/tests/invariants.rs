//! Invariants for the recorder and trace encodings.
//!
//! These tests treat:
//! - the **recorder** as the sole owner of settled sets, which must never
//!   shrink however settle and record calls interleave, and
//! - the **encodings** (JSON, CBOR) as lossless, so a trace read back hashes
//!   to the same digest as the one written.

use algotrace_core::digest::trace_digest;
use algotrace_core::io::{from_cbor, to_cbor};
use algotrace_core::{CheckConfig, Extra, Recorder, Step, StepKind, TraceChecker, TraceFile};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Settle(usize),
    SettleRange(usize, usize),
    Record,
}

fn arb_op(n: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..n).prop_map(Op::Settle),
        (0..n, 0..n).prop_map(|(a, b)| Op::SettleRange(a.min(b), a.max(b))),
        Just(Op::Record),
        Just(Op::Record),
    ]
}

prop_compose! {
    fn arb_values()(v in prop::collection::vec(-1.0e6f64..1.0e6, 1..16)) -> Vec<f64> { v }
}

prop_compose! {
    fn arb_script()(values in arb_values())
        (ops in prop::collection::vec(arb_op(values.len()), 0..40), values in Just(values.clone()))
        -> (Vec<f64>, Vec<Op>)
    {
        (values, ops)
    }
}

/// Replay `ops` against a sorting recorder over a fixed snapshot.
fn run(values: &[f64], ops: &[Op]) -> Vec<Step> {
    let mut rec = Recorder::new(StepKind::Sorting);
    rec.record(Step::sorting(values, "Initial array"));
    for (i, op) in ops.iter().enumerate() {
        match *op {
            Op::Settle(k) => rec.settle(k),
            Op::SettleRange(lo, hi) => rec.settle_range(lo..hi),
            Op::Record => rec.record(
                Step::sorting(values, format!("event {i}"))
                    .primary(i % values.len())
                    .with_extra(Extra::Range { lo: 0, hi: values.len() - 1 }),
            ),
        }
    }
    rec.finish()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, // good CI/runtime balance
        .. ProptestConfig::default()
    })]

    #[test]
    fn recorded_settled_sets_never_shrink((values, ops) in arb_script()) {
        let steps = run(&values, &ops);
        prop_assert!(!steps.is_empty());
        prop_assert!(steps[0].settled.is_empty());
        for w in steps.windows(2) {
            prop_assert!(w[0].settled.is_subset(&w[1].settled));
        }
    }

    #[test]
    fn json_and_cbor_preserve_steps_and_digest((values, ops) in arb_script()) {
        let steps = run(&values, &ops);
        let tf = TraceFile::new("bubble", values, steps);
        let digest = trace_digest(&tf.steps).unwrap();

        let json = serde_json::to_vec(&tf).unwrap();
        let from_json: TraceFile = serde_json::from_slice(&json).unwrap();
        prop_assert_eq!(&from_json.steps, &tf.steps);
        prop_assert_eq!(trace_digest(&from_json.steps).unwrap(), digest);

        let cbor = to_cbor(&tf).unwrap();
        let from_cbor_tf: TraceFile = from_cbor(&cbor).unwrap();
        prop_assert_eq!(&from_cbor_tf.steps, &tf.steps);
        prop_assert_eq!(trace_digest(&from_cbor_tf.steps).unwrap(), digest);
    }

    #[test]
    fn digest_tracks_settled_sets(values in arb_values()) {
        let plain = run(&values, &[Op::Record]);
        let settled = run(&values, &[Op::Settle(0), Op::Record]);
        prop_assert_ne!(trace_digest(&plain).unwrap(), trace_digest(&settled).unwrap());
    }
}

#[test]
fn checker_accepts_any_monotone_recording() {
    let values = [3.0, 1.0, 2.0];
    let ops = [Op::Record, Op::Settle(2), Op::Record, Op::SettleRange(0, 3), Op::Record];
    let steps = run(&values, &ops);
    let summary = TraceChecker::with_config(CheckConfig { require_sorted: false })
        .check(&steps, None)
        .unwrap();
    assert_eq!(summary.settled, 3);
}
