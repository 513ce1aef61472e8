//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::ClockState;

/// What a client renders for the clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockView {
    pub break_length: u32,
    pub session_length: u32,
    /// "Session" or "Break"
    pub timer_label: String,
    /// Remaining time as MM:SS
    pub time_left: String,
    pub time_left_seconds: u32,
    pub running: bool,
}

impl From<&ClockState> for ClockView {
    fn from(clock: &ClockState) -> Self {
        Self {
            break_length: clock.break_length,
            session_length: clock.session_length,
            timer_label: clock.phase.label().to_string(),
            time_left: clock.formatted_time_left(),
            time_left_seconds: clock.time_left,
            running: clock.running,
        }
    }
}

/// API response structure for user action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub clock: ClockView,
}

impl ApiResponse {
    /// Create a new API response, with status derived from the clock
    pub fn new(message: String, clock: &ClockState) -> Self {
        let status = if clock.running { "running" } else { "stopped" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            clock: ClockView::from(clock),
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub clock: ClockView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
