//! Host-driven scheduler for frame loops and deterministic tests

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tracing::warn;

use super::{Scheduler, TickFn, TickHandle};

struct Entry {
    period: Duration,
    tick: TickFn,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler whose ticks only fire when the host calls [`ManualScheduler::advance`].
///
/// Each call to `advance(n)` counts as `n` elapsed periods for every live
/// schedule, regardless of the period it was registered with.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live schedule `ticks` times
    pub fn advance(&self, ticks: u32) {
        for _ in 0..ticks {
            // Callbacks run without the entry lock held so they may schedule
            // or cancel in turn.
            let live: Vec<(TickFn, Arc<AtomicBool>)> = match self.entries.lock() {
                Ok(mut entries) => {
                    entries.retain(|entry| !entry.cancelled.load(Ordering::SeqCst));
                    entries
                        .iter()
                        .map(|entry| (Arc::clone(&entry.tick), Arc::clone(&entry.cancelled)))
                        .collect()
                }
                Err(e) => {
                    warn!("Failed to lock manual scheduler: {}", e);
                    return;
                }
            };

            for (tick, cancelled) in live {
                if !cancelled.load(Ordering::SeqCst) {
                    tick();
                }
            }
        }
    }

    /// Number of schedules that have not been cancelled
    pub fn active(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| !entry.cancelled.load(Ordering::SeqCst))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Periods of the live schedules, in registration order
    pub fn periods(&self) -> Vec<Duration> {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| !entry.cancelled.load(Ordering::SeqCst))
                    .map(|entry| entry.period)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_every(&self, period: Duration, tick: TickFn) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));

        match self.entries.lock() {
            Ok(mut entries) => entries.push(Entry {
                period,
                tick,
                cancelled: Arc::clone(&cancelled),
            }),
            Err(e) => warn!("Failed to register manual schedule: {}", e),
        }

        TickHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}
