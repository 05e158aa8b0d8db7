use crate::caller;
use crate::sample_log::SampleLog;
use crate::target::Target;
use std::num::NonZeroU32;

/// Run one worker's share of a burst: `burst_size` sequential calls, no retries
/// and no sleeping in between.
pub(crate) async fn run_burst<T: Target + ?Sized>(
    target: &T,
    log: &SampleLog,
    burst_size: NonZeroU32,
) {
    for _ in 0..burst_size.get() {
        caller::call(target, log).await;
    }
}
