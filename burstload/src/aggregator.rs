//! Reduction of a finished run's samples into a [`MetricsSummary`].
use burstload_core::{MetricsSummary, Sample};

/// Summarise `samples` for a run which issued `issued` calls.
///
/// Latencies are reported in seconds. Percentiles use linear interpolation
/// between order statistics. The error percentage is
/// relative to `issued`, so samples lost to a crashed worker still count
/// against the run instead of vanishing. An empty input yields zeros.
pub fn aggregate(samples: &[Sample], issued: u64) -> MetricsSummary {
    let failure_count = samples.iter().filter(|s| s.is_failure()).count() as u64;

    let error_percentage = if issued == 0 {
        0.
    } else {
        (100. * failure_count as f64 / issued as f64).min(100.)
    };

    let mut latencies: Vec<f64> = samples.iter().map(|s| s.latency.as_secs_f64()).collect();
    latencies.sort_by(f64::total_cmp);

    let mean_latency = if latencies.is_empty() {
        0.
    } else {
        statistical::mean(&latencies)
    };

    MetricsSummary {
        total_iterations: issued,
        sample_count: samples.len() as u64,
        failure_count,
        mean_latency,
        p90_latency: percentile(&latencies, 90.),
        p99_latency: percentile(&latencies, 99.),
        error_percentage,
    }
}

// The `p`th percentile (0-100) of an ascending-sorted slice.
//
// With `rank = p / 100 * (n - 1)` the result is
// `v[floor(rank)] + (v[ceil(rank)] - v[floor(rank)]) * fract(rank)`.
// For `1..=100` this gives 90.1 at p90 and 99.01 at p99. Returns 0 for an
// empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.;
    }

    let rank = (p / 100.).clamp(0., 1.) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (low, high) = (sorted[lo], sorted[hi]);

    (low + (high - low) * (rank - lo as f64)).clamp(low.min(high), low.max(high))
}
