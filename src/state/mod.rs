//! State management module
//!
//! This module contains the clock state machine, the controller that owns it,
//! and the application state shared with the HTTP handlers.

pub mod app_state;
pub mod clock_state;
pub mod controller;
pub mod phase;

// Re-export main types
pub use app_state::AppState;
pub use clock_state::{format_clock, ClockState, TickOutcome};
pub use controller::{TimerController, TICK_PERIOD};
pub use phase::Phase;
