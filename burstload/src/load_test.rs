//! Load test builder
use crate::scheduler::{RunOutcome, Scheduler};
use crate::target::{HttpTarget, Target};
use burstload_core::{ConfigError, RunConfig, DEFAULT_BURST_PACE, DEFAULT_METHOD};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

/// A configurable load test which runs when awaited.
///
/// Parameters are validated on the first poll; an invalid configuration
/// resolves to a [`ConfigError`] without issuing a single request.
///
/// # Example
/// ```no_run
/// use burstload::prelude::*;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let outcome = LoadTest::new("http://localhost:3000/")
///         .concurrency(10)
///         .burst_size(5)
///         .duration(Duration::from_secs(60))
///         .await
///         .unwrap();
///
///     println!("{}", outcome.summary);
/// }
/// ```
pub struct LoadTest {
    endpoint: String,
    method: String,
    concurrency: u32,
    burst_size: u32,
    duration: Duration,
    pace: Duration,
    target: Option<Arc<dyn Target>>,
    runner_fut: Option<Pin<Box<dyn Future<Output = Result<RunOutcome, ConfigError>> + Send>>>,
}

impl LoadTest {
    /// A single worker issuing single-call bursts with GET. A `.duration()`
    /// must be supplied.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: DEFAULT_METHOD.to_string(),
            concurrency: 1,
            burst_size: 1,
            duration: Duration::ZERO,
            pace: DEFAULT_BURST_PACE,
            target: None,
            runner_fut: None,
        }
    }

    /// Request method, case-insensitive. Only `"get"` is accepted.
    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    /// Number of workers launched per burst.
    pub fn concurrency(mut self, concurrency: u32) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Number of sequential calls each worker makes per burst.
    pub fn burst_size(mut self, burst_size: u32) -> Self {
        self.burst_size = burst_size;
        self
    }

    /// How long to keep launching bursts.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Delay between two bursts. Defaults to one second.
    pub fn pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Drive a custom [`Target`] instead of issuing HTTP requests to the
    /// endpoint. The configuration is validated all the same.
    pub fn target(mut self, target: Arc<dyn Target>) -> Self {
        self.target = Some(target);
        self
    }

    /// Validate the parameters into a [`RunConfig`].
    pub fn config(&self) -> Result<RunConfig, ConfigError> {
        RunConfig::new(
            self.endpoint.clone(),
            &self.method,
            self.concurrency,
            self.burst_size,
            self.duration,
        )
        .map(|config| config.with_pace(self.pace))
    }
}

impl Future for LoadTest {
    type Output = Result<RunOutcome, ConfigError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.runner_fut.is_none() {
            let config = match self.config() {
                Ok(config) => config,
                Err(err) => return Poll::Ready(Err(err)),
            };

            let target = match &self.target {
                Some(target) => target.clone(),
                None => Arc::new(HttpTarget::new(&config)) as Arc<dyn Target>,
            };

            self.runner_fut = Some(Box::pin(async move {
                Ok(Scheduler::new(config, target).run().await)
            }));
        }

        match &mut self.runner_fut {
            Some(runner) => runner.as_mut().poll(cx),
            None => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MockTarget;

    #[tokio::test(start_paused = true)]
    async fn rejects_unsupported_method_before_dispatch() {
        let target = Arc::new(MockTarget::new(Duration::from_millis(10)));

        let res = LoadTest::new("http://localhost/")
            .method("POST")
            .concurrency(4)
            .duration(Duration::from_secs(1))
            .target(target.clone())
            .await;

        assert!(matches!(res, Err(ConfigError::UnsupportedMethod(m)) if m == "POST"));
        assert_eq!(target.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_duration_is_a_config_error() {
        let target = Arc::new(MockTarget::new(Duration::from_millis(10)));

        let res = LoadTest::new("http://localhost/").target(target.clone()).await;

        assert!(matches!(res, Err(ConfigError::ZeroDuration)));
        assert_eq!(target.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn runs_with_custom_target() {
        let target = Arc::new(MockTarget::new(Duration::from_millis(10)).failing_every(4));

        let outcome = LoadTest::new("http://localhost/")
            .method("get")
            .concurrency(2)
            .burst_size(2)
            .duration(Duration::from_millis(1))
            .target(target.clone())
            .await
            .unwrap();

        assert_eq!(outcome.bursts, 1);
        assert_eq!(outcome.summary.total_iterations, 4);
        assert_eq!(outcome.summary.error_percentage, 25.);
        assert_eq!(target.calls(), 4);
    }
}
