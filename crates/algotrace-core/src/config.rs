//! Tunables shared by the generators.

use serde::{Deserialize, Serialize};

/// Default bucket cap for bucket sort.
pub const DEFAULT_MAX_BUCKETS: usize = 10;

/// Default cap on `max - min + 1` for counting sort.
pub const DEFAULT_MAX_COUNTING_RANGE: usize = 100_000;

/// Fallback tree input used when the caller supplies nothing.
pub const DEFAULT_TREE_VALUES: [f64; 7] = [50.0, 30.0, 70.0, 20.0, 40.0, 60.0, 80.0];

/// Optional knobs for generators; extend as needed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TraceConfig {
    /// Bucket sort uses `min(n, max_buckets)` buckets.
    pub max_buckets: usize,
    /// Counting sort refuses ranges wider than this.
    pub max_counting_range: usize,
    /// Values substituted when the tree generator gets no input.
    pub default_tree_values: Vec<f64>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_buckets: DEFAULT_MAX_BUCKETS,
            max_counting_range: DEFAULT_MAX_COUNTING_RANGE,
            default_tree_values: DEFAULT_TREE_VALUES.to_vec(),
        }
    }
}
