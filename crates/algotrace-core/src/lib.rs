//! algotrace-core: step schema, recorder, validation, and trace I/O.
//!
//! This crate defines the **stable boundary** shared by every generator in
//! the workspace:
//! - the step record (`Step`, `StepKind`, `Snapshot`, `Extra`),
//! - the per-call accumulator (`Recorder`) that stamps settled positions,
//! - the owned binary-tree node used for tree snapshots (`Node`),
//! - trace validation (`check`), digests (`digest`), and
//! - JSON/CBOR/JSONL I/O for the `TraceFile` envelope.
//!
//! ```
//! use algotrace_core::{Recorder, Step, StepKind};
//!
//! let mut rec = Recorder::new(StepKind::Sorting);
//! let arr = vec![2.0, 1.0];
//! rec.record(Step::sorting(&arr, "Initial array").primary(0).secondary(1));
//! rec.settle_range(0..arr.len());
//! rec.record(Step::sorting(&[1.0, 2.0], "Sorted"));
//! let steps = rec.finish();
//! assert_eq!(steps.len(), 2);
//! assert_eq!(steps[1].settled.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Trace validation: settled monotonicity, terminal coverage, sortedness.
pub mod check;
/// Tunables shared by generators (bucket count, counting range, tree defaults).
pub mod config;
/// BLAKE3 trace digests used to compare traces structurally.
pub mod digest;
/// Versioned trace envelope (`TraceFile`).
pub mod format;
/// JSON/CBOR helpers and auto-detecting read/write APIs.
pub mod io;
/// Streaming JSONL/NDJSON helpers for long traces.
pub mod io_jsonl;
/// Owned binary-tree node used for tree snapshots.
pub mod node;
/// Per-call step accumulator.
pub mod recorder;
/// Canonical step schema.
pub mod step;

// ---- Re-exports for workspace compatibility ----
pub use check::{CheckConfig, TraceChecker, TraceSummary};
pub use config::TraceConfig;
pub use format::TraceFile;
pub use node::Node;
pub use recorder::Recorder;
pub use step::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use algotrace_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        config::TraceConfig, node::Node, recorder::Recorder, step::*, format::TraceFile,
    };
}
