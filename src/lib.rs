//! Focus Clock - A 25+5 interval clock served over HTTP
//!
//! This library provides the work/break countdown state machine, the
//! controller that drives it from a one-second tick, and the HTTP surface
//! clients use to render it and press its buttons.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, ClockState, Phase, TimerController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
