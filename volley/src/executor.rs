use crate::client::HttpGet;
use crate::TRANSPORT_FAILURE_CODE;
use reqwest::{StatusCode, Url};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
#[allow(unused)]
use tracing::{debug, error, trace, warn};

/// Classified result of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// No status code was received (connection refused, timeout, DNS failure, ...).
    Transport,
    /// A status code other than `200 OK`.
    Http(StatusCode),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Numeric code for reporting: the HTTP status, or `-1` for transport failures.
    pub fn code(&self) -> i32 {
        match self {
            Self::Success => i32::from(StatusCode::OK.as_u16()),
            Self::Transport => TRANSPORT_FAILURE_CODE,
            Self::Http(status) => i32::from(status.as_u16()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "ok"),
            Self::Transport => write!(f, "transport error"),
            Self::Http(status) => write!(f, "HTTP {}", status.as_u16()),
        }
    }
}

/// Issues one GET per call against a fixed target.
pub struct RequestExecutor<C> {
    client: C,
    url: Url,
}

impl<C: HttpGet> RequestExecutor<C> {
    pub fn new(client: C, url: Url) -> Self {
        Self { client, url }
    }

    /// Perform the request for task `index`, timing the call. Failures are classified, never
    /// returned as errors.
    pub async fn execute(&self, index: u64) -> (Outcome, Duration) {
        let start = Instant::now();
        let res = self.client.get(&self.url).await;
        let elapsed = start.elapsed();

        let outcome = match res {
            Ok(StatusCode::OK) => Outcome::Success,
            Ok(status) => Outcome::Http(status),
            Err(err) => {
                debug!("Request {index} failed before a response: {err}");
                Outcome::Transport
            }
        };
        trace!("Request {index} finished with {outcome} in {elapsed:?}");

        #[cfg(feature = "metrics")]
        record_metrics(&outcome, elapsed);

        (outcome, elapsed)
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(outcome: &Outcome, elapsed: Duration) {
    metrics::histogram!(crate::LATENCY_METRIC).record(elapsed.as_nanos() as f64);

    if outcome.is_success() {
        metrics::counter!(crate::SUCCESS_METRIC).increment(1);
    } else {
        metrics::counter!(crate::ERROR_METRIC).increment(1);
    }
}
