#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod aggregator;
pub mod caller;
pub mod load_test;
pub mod report;
pub mod sample_log;
pub mod scheduler;
pub mod target;

pub(crate) mod worker;

pub use burstload_core as core;
pub use load_test::LoadTest;
pub use scheduler::{RunOutcome, Scheduler};

pub mod prelude {
    pub use crate::load_test::LoadTest;
    pub use crate::scheduler::{RunOutcome, Scheduler};
    pub use crate::target::{HttpTarget, MockTarget, Target};

    pub use burstload_core::{ConfigError, MetricsSummary, RunConfig};
}
