use std::time::Duration;

/// The default delay between two bursts.
pub const DEFAULT_BURST_PACE: Duration = Duration::from_secs(1);

/// The method used when none is configured.
pub const DEFAULT_METHOD: &str = "GET";
