use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary statistics for a finished run.
///
/// Latencies are in seconds. `error_percentage` is relative to
/// `total_iterations` (the number of calls issued), not to `sample_count`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_iterations: u64,
    pub sample_count: u64,
    pub failure_count: u64,
    pub mean_latency: f64,
    pub p90_latency: f64,
    pub p99_latency: f64,
    pub error_percentage: f64,
}

impl MetricsSummary {
    /// `true` when some issued calls never produced a sample.
    pub fn has_missing_samples(&self) -> bool {
        self.sample_count < self.total_iterations
    }
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Iterations={}, Mean={:.4}s, p90={:.4}s, p99={:.4}s, Errors={:.2}%",
            self.total_iterations,
            self.mean_latency,
            self.p90_latency,
            self.p99_latency,
            self.error_percentage,
        )
    }
}
