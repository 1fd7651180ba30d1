use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

/// Number of requests issued when none is configured.
pub const DEFAULT_TOTAL_REQUESTS: u64 = 5_000;

/// Concurrency ceiling used when none is configured.
pub const DEFAULT_MAX_CONCURRENCY: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(1_000) };

/// Requests released per tick when no rate is configured.
pub const DEFAULT_REQUESTS_PER_TICK: NonZeroU32 = unsafe { NonZeroU32::new_unchecked(1_000) };

/// Tick interval used when none is configured.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Failure code recorded for requests which never produced a status code.
pub const TRANSPORT_FAILURE_CODE: i32 = -1;

#[cfg(feature = "metrics")]
pub(crate) const SUCCESS_METRIC: &str = "volley.requests.success";
#[cfg(feature = "metrics")]
pub(crate) const ERROR_METRIC: &str = "volley.requests.error";
#[cfg(feature = "metrics")]
pub(crate) const LATENCY_METRIC: &str = "volley.requests.latency";
