//! The endpoint being driven.
//!
//! A [`Target`] performs exactly one request per [`Target::call`] and reports
//! whether it succeeded. Timing and recording are done by the caller, so
//! implementations only need to classify the outcome.
use burstload_core::{CallError, Method, RunConfig};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub type CallFuture<'a> = Pin<Box<dyn Future<Output = Result<(), CallError>> + Send + 'a>>;

pub trait Target: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn call(&self) -> CallFuture<'_>;
}

/// Issues plain HTTP requests with `reqwest`.
///
/// No timeout is configured beyond the client's own; a hung connection holds
/// its worker until the transport gives up.
pub struct HttpTarget {
    client: reqwest::Client,
    endpoint: String,
    method: Method,
}

impl HttpTarget {
    pub fn new(config: &RunConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &RunConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint().to_string(),
            method: config.method(),
        }
    }
}

impl Target for HttpTarget {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn call(&self) -> CallFuture<'_> {
        Box::pin(async move {
            let request = match self.method {
                Method::Get => self.client.get(&self.endpoint),
            };

            let response = request.send().await.map_err(|e| classify(&e))?;
            let status = response.status();

            // Drain the body so the measured latency covers the full response.
            response.bytes().await.map_err(|e| classify(&e))?;

            if status.is_success() {
                Ok(())
            } else {
                Err(CallError::Status(status.as_u16()))
            }
        })
    }
}

fn classify(err: &reqwest::Error) -> CallError {
    if err.is_timeout() {
        CallError::Timeout
    } else if err.is_connect() {
        CallError::Connection(err.to_string())
    } else if let Some(status) = err.status() {
        CallError::Status(status.as_u16())
    } else {
        CallError::Transport(err.to_string())
    }
}

/// In-process target which sleeps for a fixed delay instead of touching the
/// network. Every `n`th call can be made to fail with a 500.
pub struct MockTarget {
    delay: Duration,
    fail_every: Option<u64>,
    calls: AtomicU64,
}

impl MockTarget {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail_every: None,
            calls: AtomicU64::new(0),
        }
    }

    /// Fail every `n`th call. `0` disables failures.
    pub fn failing_every(mut self, n: u64) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }

    /// Number of calls started so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Target for MockTarget {
    fn name(&self) -> &str {
        "mock"
    }

    fn call(&self) -> CallFuture<'_> {
        Box::pin(async move {
            let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.fail_every {
                Some(every) if n % every == 0 => Err(CallError::Status(500)),
                _ => Ok(()),
            }
        })
    }
}
