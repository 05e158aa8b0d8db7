use crate::sample_log::SampleLog;
use crate::target::Target;
use burstload_core::Sample;
use tokio::time::Instant;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

#[cfg(feature = "metrics")]
pub(crate) const SUCCESS_COUNTER: &str = "burstload_success";
#[cfg(feature = "metrics")]
pub(crate) const ERROR_COUNTER: &str = "burstload_error";
#[cfg(feature = "metrics")]
pub(crate) const LATENCY_HISTOGRAM: &str = "burstload_latency";

#[cfg(feature = "metrics")]
pub(crate) fn describe_metrics() {
    metrics::describe_counter!(SUCCESS_COUNTER, "Calls which completed successfully");
    metrics::describe_counter!(ERROR_COUNTER, "Calls which failed");
    metrics::describe_histogram!(
        LATENCY_HISTOGRAM,
        metrics::Unit::Nanoseconds,
        "Latency of every call, successful or not"
    );
}

/// Issue one call against `target`, time it, and append the resulting sample
/// to `log`.
///
/// Failures are logged and recorded, never returned. The latency of a failed
/// call is the time until the failure was detected.
pub async fn call<T: Target + ?Sized>(target: &T, log: &SampleLog) -> Sample {
    let start = Instant::now();
    let res = target.call().await;
    let latency = start.elapsed();

    #[cfg(feature = "metrics")]
    {
        metrics::histogram!(LATENCY_HISTOGRAM).record(latency.as_nanos() as f64);
        if res.is_ok() {
            metrics::counter!(SUCCESS_COUNTER).increment(1);
        } else {
            metrics::counter!(ERROR_COUNTER).increment(1);
        }
    }

    let sample = match res {
        Ok(()) => Sample::success(latency),
        Err(err) => {
            warn!(
                endpoint = target.name(),
                kind = err.category(),
                "Call failed after {latency:?}: {err}"
            );
            Sample::failure(latency)
        }
    };

    log.push(sample);
    sample
}
