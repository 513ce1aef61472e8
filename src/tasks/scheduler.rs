//! Repeating tick scheduling abstraction

use std::{fmt, sync::Arc, time::Duration};

/// Callback fired once per period while a schedule is live
pub type TickFn = Arc<dyn Fn() + Send + Sync>;

/// Something that can fire a callback at a fixed period until told to stop
pub trait Scheduler: Send + Sync {
    /// Start firing `tick` every `period`. The first firing happens one full
    /// period after scheduling. Firing stops once the returned handle is
    /// cancelled or dropped.
    fn schedule_every(&self, period: Duration, tick: TickFn) -> TickHandle;
}

/// Cancellation handle for a repeating schedule
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    /// Wrap the action that stops the schedule
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the schedule
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}
