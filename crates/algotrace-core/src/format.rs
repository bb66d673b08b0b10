//! Versioned trace envelope written by the CLI and read back for checks.

use serde::{Deserialize, Serialize};

use crate::step::Step;

/// Current envelope version.
pub const TRACE_VERSION: u16 = 1;

/// Trace envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TraceFile {
    /// Format/version tag for forward-compat.
    pub version: u16,
    /// Generator that produced the steps (`"bubble"`, `"tree"`, …).
    pub algorithm: String,
    /// Input as given by the caller (before any default substitution).
    pub input: Vec<f64>,
    /// Ordered steps.
    pub steps: Vec<Step>,
    /// Optional metadata (seed, config, digest…).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl TraceFile {
    /// Wrap `steps` in a current-version envelope.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, input: Vec<f64>, steps: Vec<Step>) -> Self {
        Self {
            version: TRACE_VERSION,
            algorithm: algorithm.into(),
            input,
            steps,
            meta: None,
        }
    }

    /// Number of steps.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Terminal step, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}
