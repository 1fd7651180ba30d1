use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Fixed-period tick source.
///
/// The first tick completes one period after construction. Ticks delayed by a slow admission are
/// delivered back to back afterwards rather than dropped.
pub(crate) struct Timer {
    interval: Interval,
    last_tick: Instant,
    interval_dur: Duration,
}

impl Timer {
    pub fn new(interval_dur: Duration) -> Self {
        let now = Instant::now();
        let mut interval = interval_at(now + interval_dur, interval_dur);
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self {
            interval,
            last_tick: now,
            interval_dur,
        }
    }

    /// Wait for the next tick, returning the time since the previous one.
    pub async fn tick(&mut self) -> Duration {
        let next = self.interval.tick().await;
        let elapsed = self.last_tick.elapsed();
        self.last_tick = next;
        elapsed
    }

    pub fn interval_dur(&self) -> Duration {
        self.interval_dur
    }
}

impl std::fmt::Display for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", humantime::format_duration(self.interval_dur))
    }
}
