//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::state::{AppState, ClockState, TimerController};
use super::responses::{ApiResponse, ClockView, HealthResponse, StatusResponse};

/// Run a user action against the controller and shape the response
fn run_action<F>(
    state: &AppState,
    action: &str,
    message: &str,
    op: F,
) -> Result<Json<ApiResponse>, StatusCode>
where
    F: FnOnce(&TimerController) -> Result<ClockState, String>,
{
    match op(&state.controller) {
        Ok(clock) => {
            state.record_action(action);
            info!("{} endpoint called - {}", action, clock.formatted_time_left());
            Ok(Json(ApiResponse::new(message.to_string(), &clock)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /break/increment
pub async fn break_increment_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, "break-increment", "Break length increment requested", |c| c.adjust_break(1))
}

/// Handle POST /break/decrement
pub async fn break_decrement_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, "break-decrement", "Break length decrement requested", |c| c.adjust_break(-1))
}

/// Handle POST /session/increment
pub async fn session_increment_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, "session-increment", "Session length increment requested", |c| c.adjust_session(1))
}

/// Handle POST /session/decrement
pub async fn session_decrement_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, "session-decrement", "Session length decrement requested", |c| c.adjust_session(-1))
}

/// Handle POST /start_stop - Toggle the countdown
pub async fn start_stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, "start_stop", "Countdown toggled", |c| c.toggle_running())
}

/// Handle POST /reset - Restore the initial clock
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, "reset", "Clock reset", |c| c.reset())
}

/// Handle GET /status - Return the clock and server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let clock = match state.controller.state() {
        Ok(clock) => clock,
        Err(e) => {
            error!("Failed to get clock state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        clock: ClockView::from(&clock),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream the clock as server-sent events.
///
/// The current clock is sent first, then one event per published change.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.controller.subscribe();

    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }

        let view = ClockView::from(&*rx.borrow_and_update());
        let event = match serde_json::to_string(&view) {
            Ok(json) => Event::default().event("clock").data(json),
            Err(e) => {
                warn!("Failed to serialize clock event: {}", e);
                Event::default().event("error").data(e.to_string())
            }
        };

        Some((Ok::<_, Infallible>(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
