use std::num::NonZeroU32;
use std::ops::Range;
#[allow(unused)]
use tracing::{debug, error, trace};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Before the first tick.
    Idle,
    /// Admitting a batch of requests per tick.
    Running,
    /// Every request admitted; waiting for in-flight requests to complete.
    Draining,
    Done,
}

/// Admission bookkeeping for a run, independent of any clock.
///
/// The runner calls [`next_batch`](Pacer::next_batch) once per tick, dispatches the returned
/// task indices in order, then calls [`end_batch`](Pacer::end_batch). Indices are handed out
/// exactly once, covering `0..total` without gaps.
#[derive(Debug, Clone)]
pub struct Pacer {
    total: u64,
    per_tick: u64,
    admitted: u64,
    state: RunState,
}

impl Pacer {
    pub fn new(total: u64, per_tick: NonZeroU32) -> Self {
        Self {
            total,
            per_tick: u64::from(per_tick.get()),
            admitted: 0,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn admitted(&self) -> u64 {
        self.admitted
    }

    pub fn remaining(&self) -> u64 {
        self.total - self.admitted
    }

    /// Leave `Idle`. An empty run goes straight to `Done`.
    pub fn start(&mut self) -> RunState {
        if self.state == RunState::Idle {
            self.state = if self.total == 0 {
                RunState::Done
            } else {
                RunState::Running
            };
        }
        self.state
    }

    /// Reserve the indices to admit on this tick. Returns an empty range outside `Running`.
    pub fn next_batch(&mut self) -> Range<u64> {
        if self.state != RunState::Running {
            return self.admitted..self.admitted;
        }

        let start = self.admitted;
        self.admitted += self.per_tick.min(self.remaining());
        start..self.admitted
    }

    /// Close the current tick's batch, moving to `Draining` once the budget is exhausted.
    pub fn end_batch(&mut self) -> RunState {
        if self.state == RunState::Running && self.admitted == self.total {
            trace!("Request budget of {} exhausted", self.total);
            self.state = RunState::Draining;
        }
        self.state
    }

    /// Mark every admitted request as completed.
    pub fn finish(&mut self) -> RunState {
        match self.state {
            RunState::Draining => self.state = RunState::Done,
            RunState::Done => {}
            state => error!("Pacer finished while {state:?}; ignoring."),
        }
        self.state
    }
}
