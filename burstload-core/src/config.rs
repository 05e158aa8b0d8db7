use crate::{ConfigError, DEFAULT_BURST_PACE, DEFAULT_METHOD};
use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds, DurationSeconds};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

/// Request method. Only GET is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            _ => Err(ConfigError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
        }
    }
}

/// Unvalidated run parameters, as collected from an operator or a config file.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RunParams {
    pub endpoint: String,
    #[serde(default = "default_method")]
    pub method: String,
    pub concurrency: u32,
    pub burst_size: u32,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub duration: Duration,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub pace: Option<Duration>,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

/// A validated, immutable description of one run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RunParams")]
pub struct RunConfig {
    endpoint: String,
    method: Method,
    concurrency: NonZeroU32,
    burst_size: NonZeroU32,
    duration: Duration,
    pace: Duration,
}

impl RunConfig {
    /// Validate the run parameters. The pacing delay starts at
    /// [`DEFAULT_BURST_PACE`]; see [`RunConfig::with_pace`].
    pub fn new(
        endpoint: impl Into<String>,
        method: &str,
        concurrency: u32,
        burst_size: u32,
        duration: Duration,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let method = method.parse()?;
        let concurrency = NonZeroU32::new(concurrency).ok_or(ConfigError::ZeroConcurrency)?;
        let burst_size = NonZeroU32::new(burst_size).ok_or(ConfigError::ZeroBurstSize)?;

        if duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }

        Ok(Self {
            endpoint,
            method,
            concurrency,
            burst_size,
            duration,
            pace: DEFAULT_BURST_PACE,
        })
    }

    /// Replace the delay slept between bursts. Zero disables it.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn concurrency(&self) -> NonZeroU32 {
        self.concurrency
    }

    pub fn burst_size(&self) -> NonZeroU32 {
        self.burst_size
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn pace(&self) -> Duration {
        self.pace
    }

    /// Number of calls issued by one burst.
    pub fn calls_per_burst(&self) -> u64 {
        u64::from(self.concurrency.get()) * u64::from(self.burst_size.get())
    }
}

impl TryFrom<RunParams> for RunConfig {
    type Error = ConfigError;

    fn try_from(params: RunParams) -> Result<Self, Self::Error> {
        let config = RunConfig::new(
            params.endpoint,
            &params.method,
            params.concurrency,
            params.burst_size,
            params.duration,
        )?;

        Ok(match params.pace {
            Some(pace) => config.with_pace(pace),
            None => config,
        })
    }
}
