use crate::error::ConfigError;
use crate::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUESTS_PER_TICK, DEFAULT_TICK_INTERVAL,
    DEFAULT_TOTAL_REQUESTS,
};
use reqwest::Url;
use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Immutable configuration for a single run.
///
/// Prefer [`RunConfig::try_new`]; configurations assembled by hand are checked again with
/// [`RunConfig::validate`] before a run starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub url: Url,
    pub total_requests: u64,
    pub max_concurrency: NonZeroUsize,
    pub requests_per_tick: NonZeroU32,
    pub tick_interval: Duration,
}

impl RunConfig {
    /// Validate raw settings into a configuration. Zero concurrency, rate or tick interval is
    /// an error.
    pub fn try_new(
        url: impl AsRef<str>,
        total_requests: u64,
        max_concurrency: usize,
        requests_per_tick: u32,
        tick_interval: Duration,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            url: parse_url(url.as_ref())?,
            total_requests,
            max_concurrency: NonZeroUsize::new(max_concurrency)
                .ok_or(ConfigError::ZeroConcurrency)?,
            requests_per_tick: NonZeroU32::new(requests_per_tick).ok_or(ConfigError::ZeroRate)?,
            tick_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration with the default request budget, rate, concurrency and tick.
    pub fn with_defaults(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::try_new(
            url,
            DEFAULT_TOTAL_REQUESTS,
            DEFAULT_MAX_CONCURRENCY.get(),
            DEFAULT_REQUESTS_PER_TICK.get(),
            DEFAULT_TICK_INTERVAL,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scheme(&self.url)?;

        if self.max_concurrency.get() > Semaphore::MAX_PERMITS {
            return Err(ConfigError::ConcurrencyTooLarge(
                self.max_concurrency.get(),
                Semaphore::MAX_PERMITS,
            ));
        }

        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(())
    }

    /// Number of ticks needed to admit every request.
    pub fn expected_ticks(&self) -> u64 {
        self.total_requests.div_ceil(u64::from(self.requests_per_tick.get()))
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::EmptyUrl);
    }

    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    check_scheme(&url)?;
    Ok(url)
}

fn check_scheme(url: &Url) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
