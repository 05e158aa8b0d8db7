use thiserror::Error;

/// Invalid run parameters. Always raised before the first burst is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unsupported HTTP method '{0}'; only GET is supported")]
    UnsupportedMethod(String),

    #[error("Target endpoint must not be empty")]
    EmptyEndpoint,

    #[error("Concurrency level must be a positive integer")]
    ZeroConcurrency,

    #[error("Burst size must be a positive integer")]
    ZeroBurstSize,

    #[error("Run duration must be positive")]
    ZeroDuration,
}

/// Why a single call was recorded as a failure.
///
/// These never leave the worker that produced them; they are logged and folded
/// into the failure count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("Request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl CallError {
    /// Short category name, used as a log field.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Timeout => "timeout",
            Self::Connection(_) => "connection",
            Self::Transport(_) => "transport",
        }
    }
}
