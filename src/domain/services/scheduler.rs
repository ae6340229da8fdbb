//! Repeating refresh scheduler.
//!
//! Fires a task once immediately and then on every interval tick until the
//! cancellation token fires. In-flight tasks are driven inside the same loop
//! through a `FuturesUnordered`, so everything runs on one task: with
//! `OverlapPolicy::Allow` two cycles can be in flight at once and the one
//! that resolves last wins, exactly like a browser `setInterval`.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt, pin_mut, select_biased};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::shared::constants::{DEFAULT_INTERVAL_MS, DEFAULT_MIN_INTERVAL_MS};
use crate::shared::errors::ConfigError;
use crate::shared::logging;

/// Timer seam: gloo-timers in the browser, tokio natively
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// What to do when a tick arrives while a previous cycle is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Start another cycle anyway; last response to resolve wins
    #[default]
    Allow,
    /// Drop the tick
    Skip,
}

impl OverlapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapPolicy::Allow => "allow",
            OverlapPolicy::Skip => "skip",
        }
    }
}

impl FromStr for OverlapPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" | "overlap" => Ok(OverlapPolicy::Allow),
            "skip" | "skip-while-in-flight" => Ok(OverlapPolicy::Skip),
            _ => Err(ConfigError::UnknownOverlap(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    interval: Duration,
    min_interval: Duration,
    overlap: OverlapPolicy,
    immediate: bool,
}

impl RefreshSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            min_interval: Duration::from_millis(DEFAULT_MIN_INTERVAL_MS),
            overlap: OverlapPolicy::default(),
            immediate: true,
        }
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Whether the first cycle runs at startup or after the first tick
    pub fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Interval actually used: the requested one raised to the floor
    pub fn interval(&self) -> Duration {
        self.interval.max(self.min_interval)
    }

    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_INTERVAL_MS))
    }
}

/// Counters returned when a schedule is cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    pub fired: u64,
    pub completed: u64,
    pub skipped: u64,
}

pub struct Scheduler<T> {
    schedule: RefreshSchedule,
    sleeper: T,
    cancel: CancellationToken,
}

impl<T: Sleeper> Scheduler<T> {
    pub fn new(schedule: RefreshSchedule, sleeper: T, cancel: CancellationToken) -> Self {
        Self {
            schedule,
            sleeper,
            cancel,
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run `task` on the schedule until cancelled. Cycles still in flight at
    /// cancellation are dropped.
    pub async fn run<F, Fut>(&self, mut task: F) -> ScheduleStats
    where
        F: FnMut() -> Fut,
        Fut: Future,
    {
        let interval = self.schedule.interval();
        if interval > self.schedule.interval {
            logging::log_interval_clamped(self.schedule.interval, interval);
        }
        logging::log_schedule_start(interval, self.schedule.overlap.as_str());

        let mut stats = ScheduleStats::default();
        let mut in_flight = FuturesUnordered::new();

        if self.cancel.is_cancelled() {
            return stats;
        }

        if self.schedule.immediate {
            in_flight.push(task());
            stats.fired += 1;
        }

        let cancelled = self.cancel.cancelled().fuse();
        let tick = self.sleeper.sleep(interval).fuse();
        pin_mut!(cancelled, tick);

        loop {
            select_biased! {
                _ = cancelled => break,
                _ = in_flight.select_next_some() => {
                    stats.completed += 1;
                }
                _ = tick => {
                    if self.schedule.overlap == OverlapPolicy::Skip && !in_flight.is_empty() {
                        logging::log_tick_skipped(in_flight.len());
                        stats.skipped += 1;
                    } else {
                        in_flight.push(task());
                        stats.fired += 1;
                    }
                    tick.set(self.sleeper.sleep(interval).fuse());
                }
            }
        }

        logging::log_schedule_stopped(stats.fired, stats.completed, stats.skipped);
        stats
    }
}
