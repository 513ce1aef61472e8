//! Tokio interval backed scheduler

use std::time::Duration;
use tokio::{
    sync::oneshot,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use super::{Scheduler, TickFn, TickHandle};

/// Fires ticks from a background tokio task.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_every(&self, period: Duration, tick: TickFn) -> TickHandle {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        tokio::spawn(ticker_task(period, tick, cancel_rx));

        TickHandle::new(move || {
            // The task may already be gone at shutdown
            let _ = cancel_tx.send(());
        })
    }
}

/// Background task that fires `tick` every `period` until cancelled
async fn ticker_task(period: Duration, tick: TickFn, mut cancel_rx: oneshot::Receiver<()>) {
    debug!("Starting ticker every {:?}", period);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            // Cancellation wins over a tick that is due at the same instant.
            // A dropped sender counts as cancellation too.
            _ = &mut cancel_rx => {
                debug!("Ticker cancelled");
                break;
            }

            _ = interval.tick() => {
                tick();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    fn counting_tick() -> (Arc<AtomicUsize>, TickFn) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let tick: TickFn = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (count, tick)
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_full_period() {
        let (count, tick) = counting_tick();
        let _handle = TokioScheduler::new().schedule_every(Duration::from_secs(1), tick);

        sleep(Duration::from_millis(999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let (count, tick) = counting_tick();
        let _handle = TokioScheduler::new().schedule_every(Duration::from_secs(1), tick);

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_schedule_stops_firing() {
        let (count, tick) = counting_tick();
        let handle = TokioScheduler::new().schedule_every(Duration::from_secs(1), tick);

        sleep(Duration::from_millis(2500)).await;
        handle.cancel();
        sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_stops_firing() {
        let (count, tick) = counting_tick();
        let handle = TokioScheduler::new().schedule_every(Duration::from_secs(1), tick);
        drop(handle);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
