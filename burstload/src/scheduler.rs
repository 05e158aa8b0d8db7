//! Burst scheduling.
//!
//! A run alternates between fanning out one burst across `concurrency` workers
//! and waiting for every one of them to finish. The deadline is only checked
//! after a burst has fully completed, so:
//!
//! - at least one burst always runs, however short the duration;
//! - a run can overshoot its duration by up to one burst;
//! - no burst is ever cut short, so every issued call has a sample.
//!
//! Whether the overshoot should be bounded by a hard cutoff is undecided; for
//! now the burst boundary is the only stop point.
use crate::aggregator::aggregate;
use crate::sample_log::SampleLog;
use crate::target::Target;
use crate::worker;
use burstload_core::{MetricsSummary, RunConfig};
use humantime::format_duration;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Stopped,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: MetricsSummary,
    pub bursts: u64,
    pub elapsed: Duration,
}

pub struct Scheduler<T: ?Sized> {
    config: RunConfig,
    target: Arc<T>,
    log: Arc<SampleLog>,
    state: State,
    issued: u64,
    bursts: u64,
}

impl<T: Target + ?Sized> Scheduler<T> {
    pub fn new(config: RunConfig, target: Arc<T>) -> Self {
        Self {
            config,
            target,
            log: Arc::new(SampleLog::new()),
            state: State::Running,
            issued: 0,
            bursts: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Drive bursts until the duration has elapsed, then aggregate.
    #[instrument(name = "run", skip_all, fields(endpoint = self.config.endpoint()))]
    pub async fn run(mut self) -> RunOutcome {
        info!(
            "Starting run: {} x {} calls per burst for {} (pace {})",
            self.config.concurrency(),
            self.config.burst_size(),
            format_duration(self.config.duration()),
            format_duration(self.config.pace()),
        );

        #[cfg(feature = "metrics")]
        crate::caller::describe_metrics();

        let start = Instant::now();
        let deadline = start + self.config.duration();

        while self.state == State::Running {
            self.step(deadline).await;
        }

        let elapsed = start.elapsed();
        let summary = aggregate(&self.log.snapshot(), self.issued);
        if summary.has_missing_samples() {
            warn!(
                "Recorded {} samples for {} issued calls",
                summary.sample_count, summary.total_iterations
            );
        }

        info!(
            "Run complete after {} bursts in {}: {summary}",
            self.bursts,
            format_duration(elapsed),
        );

        RunOutcome {
            summary,
            bursts: self.bursts,
            elapsed,
        }
    }

    /// One RUNNING iteration: burst, barrier, deadline check, pacing.
    async fn step(&mut self, deadline: Instant) -> State {
        if self.state == State::Stopped {
            return self.state;
        }

        self.burst().await;

        if Instant::now() >= deadline {
            self.state = State::Stopped;
        } else if !self.config.pace().is_zero() {
            tokio::time::sleep(self.config.pace()).await;
        }

        self.state
    }

    async fn burst(&mut self) {
        let burst_size = self.config.burst_size();
        let mut handles = Vec::with_capacity(self.config.concurrency().get() as usize);

        for id in 0..self.config.concurrency().get() {
            let target = self.target.clone();
            let log = self.log.clone();

            handles.push(tokio::spawn(
                async move { worker::run_burst(&*target, &log, burst_size).await }
                    .instrument(tracing::debug_span!("worker", id)),
            ));
        }

        // Barrier: the next decision waits on the slowest worker.
        for handle in handles {
            if let Err(err) = handle.await {
                error!("Worker task failed: {err}");
            }
        }

        self.issued += self.config.calls_per_burst();
        self.bursts += 1;

        debug!(
            "Burst {} done: issued={} recorded={} failures={}",
            self.bursts,
            self.issued,
            self.log.len(),
            self.log.failures(),
        );
    }
}
