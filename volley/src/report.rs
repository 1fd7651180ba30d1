use crate::aggregator::Tally;
use crate::executor::Outcome;
use humantime::format_duration;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total_requests: u64,
    pub success_count: u64,
    pub failure_count: u64,
    /// Wall-clock time from run start until every request completed.
    pub total_elapsed: Duration,
    pub cumulative_duration: Duration,
    pub failures: BTreeMap<u64, Outcome>,
}

impl RunReport {
    pub fn new(total_requests: u64, tally: Tally, total_elapsed: Duration) -> Self {
        Self {
            total_requests,
            success_count: tally.success_count,
            failure_count: tally.failure_count,
            total_elapsed,
            cumulative_duration: tally.cumulative_duration,
            failures: tally.failures,
        }
    }

    pub fn completed(&self) -> u64 {
        self.success_count + self.failure_count
    }

    /// Mean request duration, or `None` when no request completed.
    pub fn average_duration(&self) -> Option<Duration> {
        let completed = u128::from(self.completed());
        if completed == 0 {
            return None;
        }

        let nanos = self.cumulative_duration.as_nanos() / completed;
        Some(Duration::from_nanos(
            u64::try_from(nanos).unwrap_or(u64::MAX),
        ))
    }

    /// Failure codes keyed by task index; `-1` marks a transport failure.
    pub fn failure_codes(&self) -> BTreeMap<u64, i32> {
        self.failures
            .iter()
            .map(|(index, outcome)| (*index, outcome.code()))
            .collect()
    }

    pub fn transport_failures(&self) -> usize {
        self.failures
            .values()
            .filter(|outcome| matches!(outcome, Outcome::Transport))
            .count()
    }

    pub fn http_failures(&self) -> usize {
        self.failures
            .values()
            .filter(|outcome| matches!(outcome, Outcome::Http(_)))
            .count()
    }

    /// Completed requests per second of wall-clock time.
    pub fn requests_per_second(&self) -> f64 {
        let secs = self.total_elapsed.as_secs_f64();
        if secs > 0. {
            self.completed() as f64 / secs
        } else {
            0.
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Requests: {}", self.total_requests)?;
        writeln!(f, "Success Count: {}", self.success_count)?;
        writeln!(
            f,
            "Failure Count: {} (transport {}, HTTP {})",
            self.failure_count,
            self.transport_failures(),
            self.http_failures()
        )?;
        writeln!(f, "Total Time: {}", format_duration(self.total_elapsed))?;
        match self.average_duration() {
            Some(avg) => writeln!(f, "Average Time per Request: {}", format_duration(avg))?,
            None => writeln!(f, "Average Time per Request: n/a (no completed requests)")?,
        }
        writeln!(f, "Throughput: {:.2} req/s", self.requests_per_second())?;

        if self.failures.is_empty() {
            write!(f, "Failures: none")
        } else {
            write!(f, "Failures:")?;
            for (index, code) in self.failure_codes() {
                write!(f, "\n  {index}: {code}")?;
            }
            Ok(())
        }
    }
}
