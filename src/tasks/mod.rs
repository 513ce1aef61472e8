//! Tick scheduling module
//!
//! This module contains the scheduler abstraction that drives the countdown
//! and its tokio and host-driven implementations.

pub mod manual;
pub mod scheduler;
pub mod ticker;

// Re-export main types
pub use manual::ManualScheduler;
pub use scheduler::{Scheduler, TickFn, TickHandle};
pub use ticker::TokioScheduler;
