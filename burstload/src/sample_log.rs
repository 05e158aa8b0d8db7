use burstload_core::Sample;
use metrics_util::AtomicBucket;
use std::sync::atomic::{AtomicU64, Ordering};

/// Append-only, lock-free collection of samples shared by every worker of a run.
///
/// Appends never block each other. The success/failure counters are kept
/// alongside the bucket so progress can be logged between bursts without
/// copying the samples.
pub struct SampleLog {
    samples: AtomicBucket<Sample>,
    success: AtomicU64,
    failure: AtomicU64,
}

impl SampleLog {
    pub fn new() -> Self {
        Self {
            samples: AtomicBucket::new(),
            success: AtomicU64::new(0),
            failure: AtomicU64::new(0),
        }
    }

    pub fn push(&self, sample: Sample) {
        self.samples.push(sample);

        if sample.is_failure() {
            self.failure.fetch_add(1, Ordering::Relaxed);
        } else {
            self.success.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn len(&self) -> u64 {
        self.successes() + self.failures()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn successes(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failure.load(Ordering::Relaxed)
    }

    /// Copy out every sample recorded so far, in no particular order.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.data()
    }
}

impl Default for SampleLog {
    fn default() -> Self {
        Self::new()
    }
}
