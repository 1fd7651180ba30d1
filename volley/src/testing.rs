//! In-memory [`HttpGet`] implementations for exercising the scheduler without a network.
use crate::client::HttpGet;
use reqwest::{StatusCode, Url};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("connection refused")]
pub(crate) struct MockError;

type Script = dyn Fn(u64) -> Result<StatusCode, MockError> + Send + Sync;

/// Observes calls made against a [`ScriptedClient`].
#[derive(Debug, Default)]
pub(crate) struct CallStats {
    calls: AtomicU64,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl CallStats {
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Answers the n-th call with `script(n)` after `delay`.
pub(crate) struct ScriptedClient {
    script: Arc<Script>,
    delay: Duration,
    stats: Arc<CallStats>,
}

impl ScriptedClient {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(u64) -> Result<StatusCode, MockError> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            delay: Duration::ZERO,
            stats: Arc::new(CallStats::default()),
        }
    }

    pub fn always(res: Result<StatusCode, MockError>) -> Self {
        Self::new(move |_| res)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn stats(&self) -> Arc<CallStats> {
        self.stats.clone()
    }
}

impl HttpGet for ScriptedClient {
    type Error = MockError;

    async fn get(&self, _url: &Url) -> Result<StatusCode, MockError> {
        let call = self.stats.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.peak.fetch_max(in_flight, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.script)(call)
    }
}
