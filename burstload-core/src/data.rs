use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

/// A single observation: how long one call took and whether it succeeded.
///
/// Failed calls carry the time elapsed until the failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub latency: Duration,
    pub outcome: Outcome,
}

impl Sample {
    pub fn success(latency: Duration) -> Self {
        Self {
            latency,
            outcome: Outcome::Success,
        }
    }

    pub fn failure(latency: Duration) -> Self {
        Self {
            latency,
            outcome: Outcome::Failure,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failure
    }
}
