//! Timer controller: the single owner of the clock state

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{ClockState, Phase, TickOutcome};
use crate::{
    services::AudioCue,
    tasks::{Scheduler, TickFn, TickHandle},
};

/// Countdown cadence
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Mutable part of the controller, always accessed under one lock
struct Inner {
    clock: ClockState,
    ticker: Option<TickHandle>,
    /// Bumped every time a tick schedule starts or stops; callbacks carry
    /// the epoch they were created under and do nothing once it moves on.
    epoch: u64,
}

impl Inner {
    fn stop_ticker(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

/// State shared between the controller and its tick callback
struct Shared {
    inner: Mutex<Inner>,
    audio: Arc<dyn AudioCue>,
    /// Channel for clock updates
    update_tx: watch::Sender<ClockState>,
    /// Keep the receiver alive to prevent channel closure
    _update_rx: watch::Receiver<ClockState>,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Inner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock clock state: {}", e))
    }

    /// Send the clock to subscribers. Callers hold the state lock so
    /// published values arrive in the same order as the mutations.
    fn publish(&self, inner: &Inner) {
        if let Err(e) = self.update_tx.send(inner.clock.clone()) {
            warn!("Failed to send clock update: {}", e);
        }
    }

    /// Handle one scheduled tick
    fn on_tick(&self, epoch: u64) {
        let mut inner = match self.lock() {
            Ok(inner) => inner,
            Err(e) => {
                warn!("Dropping tick: {}", e);
                return;
            }
        };

        if inner.epoch != epoch || !inner.clock.running {
            debug!("Ignoring stale tick from epoch {}", epoch);
            return;
        }

        // The cue is driven under the lock so a concurrent reset always
        // stops and rewinds after this play, never before it.
        if let TickOutcome::PhaseChanged(phase) = inner.clock.tick() {
            info!(
                "Countdown finished, switching to {} for {} minutes",
                phase,
                inner.clock.length_of(phase)
            );
            self.audio.play();
        }

        self.publish(&inner);
    }
}

/// Owns the clock state and drives it from user actions and ticks.
///
/// Length adjustments and toggles go through here, and while running a
/// single repeating tick is registered with the injected [`Scheduler`].
pub struct TimerController {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
}

impl TimerController {
    /// Create a stopped controller in the initial state
    pub fn new(scheduler: Arc<dyn Scheduler>, audio: Arc<dyn AudioCue>) -> Self {
        let (update_tx, update_rx) = watch::channel(ClockState::new());

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    clock: ClockState::new(),
                    ticker: None,
                    epoch: 0,
                }),
                audio,
                update_tx,
                _update_rx: update_rx,
            }),
            scheduler,
        }
    }

    /// Current clock state
    pub fn state(&self) -> Result<ClockState, String> {
        self.shared.lock().map(|inner| inner.clock.clone())
    }

    /// Receive every clock state the controller publishes
    pub fn subscribe(&self) -> watch::Receiver<ClockState> {
        self.shared.update_tx.subscribe()
    }

    /// Change the break length by `delta` minutes
    pub fn adjust_break(&self, delta: i32) -> Result<ClockState, String> {
        self.adjust(Phase::Break, delta)
    }

    /// Change the session length by `delta` minutes
    pub fn adjust_session(&self, delta: i32) -> Result<ClockState, String> {
        self.adjust(Phase::Session, delta)
    }

    fn adjust(&self, phase: Phase, delta: i32) -> Result<ClockState, String> {
        let mut inner = self.shared.lock()?;

        if inner.clock.running {
            debug!("Ignoring {} length change while running", phase);
            return Ok(inner.clock.clone());
        }

        if inner.clock.adjust_length(phase, delta) {
            info!("{} length set to {} minutes", phase, inner.clock.length_of(phase));
            self.shared.publish(&inner);
        } else {
            debug!("Ignoring out of range {} length change by {}", phase, delta);
        }

        Ok(inner.clock.clone())
    }

    /// Start the countdown if stopped, stop it if running
    pub fn toggle_running(&self) -> Result<ClockState, String> {
        let mut inner = self.shared.lock()?;

        if inner.clock.toggle_running() {
            inner.stop_ticker();
            let epoch = inner.epoch;
            let weak = Arc::downgrade(&self.shared);
            inner.ticker = Some(self.scheduler.schedule_every(TICK_PERIOD, tick_callback(weak, epoch)));
            info!("Countdown started at {}", inner.clock.formatted_time_left());
        } else {
            inner.stop_ticker();
            info!("Countdown paused at {}", inner.clock.formatted_time_left());
        }

        self.shared.publish(&inner);
        Ok(inner.clock.clone())
    }

    /// Stop the countdown, restore the initial state and silence the cue
    pub fn reset(&self) -> Result<ClockState, String> {
        let mut inner = self.shared.lock()?;
        inner.stop_ticker();
        inner.clock.reset();

        self.shared.audio.stop();
        self.shared.audio.rewind();

        info!("Clock reset");
        self.shared.publish(&inner);
        Ok(inner.clock.clone())
    }

    /// Cancel any pending tick and leave the clock stopped
    pub fn shutdown(&self) -> Result<ClockState, String> {
        let mut inner = self.shared.lock()?;
        inner.stop_ticker();
        inner.clock.running = false;

        debug!("Clock shut down at {}", inner.clock.formatted_time_left());
        self.shared.publish(&inner);
        Ok(inner.clock.clone())
    }
}

/// Build the scheduled callback; it only holds a weak reference so a torn
/// down controller is never touched.
fn tick_callback(shared: Weak<Shared>, epoch: u64) -> TickFn {
    Arc::new(move || {
        if let Some(shared) = shared.upgrade() {
            shared.on_tick(epoch);
        }
    })
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("clock", &self.state())
            .finish()
    }
}
