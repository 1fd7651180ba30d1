use crate::error::RunError;
use crate::executor::Outcome;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

/// Aggregated results of completed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub success_count: u64,
    pub failure_count: u64,
    /// Failed requests keyed by task index.
    pub failures: BTreeMap<u64, Outcome>,
    /// Sum of every request's duration, successful or not.
    pub cumulative_duration: Duration,
}

impl Tally {
    pub fn completed(&self) -> u64 {
        self.success_count + self.failure_count
    }
}

/// Thread-safe accumulator shared by all request tasks.
///
/// Every field of the [`Tally`] is updated under one lock so a reader never observes a count
/// without its matching duration.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    tally: Mutex<Tally>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, index: u64, outcome: Outcome, duration: Duration) -> Result<(), RunError> {
        let mut tally = self.tally.lock()?;

        if outcome.is_success() {
            tally.success_count += 1;
        } else {
            tally.failure_count += 1;
            tally.failures.insert(index, outcome);
        }
        tally.cumulative_duration += duration;

        Ok(())
    }

    /// Copy of the current state. Only final once no further `record` calls can happen.
    pub fn snapshot(&self) -> Result<Tally, RunError> {
        Ok(self.tally.lock()?.clone())
    }
}
