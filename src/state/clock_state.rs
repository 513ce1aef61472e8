//! Clock state structure and its countdown state machine

use serde::{Deserialize, Serialize};

use super::Phase;

/// Shortest configurable phase length in minutes
pub const MIN_LENGTH: u32 = 1;
/// Longest configurable phase length in minutes
pub const MAX_LENGTH: u32 = 60;
pub const DEFAULT_BREAK_LENGTH: u32 = 5;
pub const DEFAULT_SESSION_LENGTH: u32 = 25;

/// Result of advancing the clock by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is stopped, nothing changed
    Idle,
    /// One second was taken off the countdown
    Counted,
    /// The countdown had reached zero and the clock moved into this phase
    PhaseChanged(Phase),
}

/// Everything the clock displays and counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    /// Break length in minutes
    pub break_length: u32,
    /// Session length in minutes
    pub session_length: u32,
    /// Remaining seconds in the current phase
    pub time_left: u32,
    pub phase: Phase,
    pub running: bool,
}

impl ClockState {
    /// Create the initial 25 + 5 state, stopped at the start of a session
    pub fn new() -> Self {
        Self {
            break_length: DEFAULT_BREAK_LENGTH,
            session_length: DEFAULT_SESSION_LENGTH,
            time_left: DEFAULT_SESSION_LENGTH * 60,
            phase: Phase::Session,
            running: false,
        }
    }

    /// Configured length in minutes for a phase
    pub fn length_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Session => self.session_length,
            Phase::Break => self.break_length,
        }
    }

    /// Change a phase length by `delta` minutes.
    ///
    /// Ignored while running and when the result would leave
    /// [`MIN_LENGTH`, `MAX_LENGTH`]. Adjusting the active phase reloads the
    /// countdown from the new length. Returns whether the length changed.
    pub fn adjust_length(&mut self, phase: Phase, delta: i32) -> bool {
        if self.running || delta == 0 {
            return false;
        }

        let current = i64::from(self.length_of(phase));
        let target = current + i64::from(delta);
        if target < i64::from(MIN_LENGTH) || target > i64::from(MAX_LENGTH) {
            return false;
        }

        let target = target as u32;
        match phase {
            Phase::Session => self.session_length = target,
            Phase::Break => self.break_length = target,
        }

        if self.phase == phase {
            self.time_left = target * 60;
        }
        true
    }

    pub fn adjust_break(&mut self, delta: i32) -> bool {
        self.adjust_length(Phase::Break, delta)
    }

    pub fn adjust_session(&mut self, delta: i32) -> bool {
        self.adjust_length(Phase::Session, delta)
    }

    /// Flip between running and stopped, returning the new value
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the countdown by one second.
    ///
    /// The phase switch happens on the tick that finds the countdown
    /// already at zero, so "00:00" stays visible for one full tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        if self.time_left > 0 {
            self.time_left -= 1;
            return TickOutcome::Counted;
        }

        self.phase = self.phase.next();
        self.time_left = self.length_of(self.phase) * 60;
        TickOutcome::PhaseChanged(self.phase)
    }

    /// Remaining time as `MM:SS`
    pub fn formatted_time_left(&self) -> String {
        format_clock(self.time_left)
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number of seconds as zero-padded `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
