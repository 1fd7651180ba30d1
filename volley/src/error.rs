use std::sync::PoisonError;
use thiserror::Error;
use tokio::task::JoinError;

/// Rejected run configuration. Always raised before any request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Target URL is empty")]
    EmptyUrl,

    #[error("Invalid target URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme `{0}`; expected http or https")]
    UnsupportedScheme(String),

    #[error("Max concurrency must be greater than zero")]
    ZeroConcurrency,

    #[error("Max concurrency {0} exceeds the supported maximum of {1}")]
    ConcurrencyTooLarge(usize, usize),

    #[error("Requests per tick must be greater than zero")]
    ZeroRate,

    #[error("Tick interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Concurrency gate closed unexpectedly.")]
    GateClosed,

    #[error("Request task failed: {0}")]
    Worker(#[from] JoinError),

    #[error("Mutex is poisoned.")]
    PoisonData,
}

impl<T> From<PoisonError<T>> for RunError {
    fn from(_err: PoisonError<T>) -> Self {
        Self::PoisonData
    }
}
