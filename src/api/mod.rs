//! HTTP API module
//!
//! This module contains the endpoints through which clients render the clock
//! and send user actions.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/break/increment", post(break_increment_handler))
        .route("/break/decrement", post(break_decrement_handler))
        .route("/session/increment", post(session_increment_handler))
        .route("/session/decrement", post(session_decrement_handler))
        .route("/start_stop", post(start_stop_handler))
        .route("/reset", post(reset_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        state::TimerController,
        tasks::ManualScheduler,
        testing::{CueEvent, RecordingCue},
    };

    fn setup() -> (Router, ManualScheduler, RecordingCue) {
        let scheduler = ManualScheduler::new();
        let cue = RecordingCue::new();
        let controller = TimerController::new(Arc::new(scheduler.clone()), Arc::new(cue.clone()));
        let state = Arc::new(AppState::new(25005, "127.0.0.1".to_string(), controller));
        (create_router(state), scheduler, cue)
    }

    async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&body).expect("json"))
    }

    #[tokio::test]
    async fn status_reports_initial_clock() {
        let (router, _, _) = setup();
        let (status, body) = call(&router, Method::GET, "/status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["clock"]["break_length"], 5);
        assert_eq!(body["clock"]["session_length"], 25);
        assert_eq!(body["clock"]["timer_label"], "Session");
        assert_eq!(body["clock"]["time_left"], "25:00");
        assert_eq!(body["clock"]["running"], false);
        assert_eq!(body["port"], 25005);
        assert!(body["last_action"].is_null());
    }

    #[tokio::test]
    async fn length_buttons_adjust_clock() {
        let (router, _, _) = setup();

        let (status, body) = call(&router, Method::POST, "/session/increment").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["clock"]["session_length"], 26);
        assert_eq!(body["clock"]["time_left"], "26:00");

        let (_, body) = call(&router, Method::POST, "/break/decrement").await;
        assert_eq!(body["clock"]["break_length"], 4);
        assert_eq!(body["clock"]["time_left"], "26:00");

        let (_, body) = call(&router, Method::POST, "/break/increment").await;
        assert_eq!(body["clock"]["break_length"], 5);

        let (_, body) = call(&router, Method::POST, "/session/decrement").await;
        assert_eq!(body["clock"]["session_length"], 25);

        let (_, body) = call(&router, Method::GET, "/status").await;
        assert_eq!(body["last_action"], "session-decrement");
    }

    #[tokio::test]
    async fn start_stop_runs_countdown() {
        let (router, scheduler, _) = setup();

        let (_, body) = call(&router, Method::POST, "/start_stop").await;
        assert_eq!(body["status"], "running");
        scheduler.advance(61);

        let (_, body) = call(&router, Method::POST, "/session/increment").await;
        assert_eq!(body["clock"]["session_length"], 25);
        assert_eq!(body["clock"]["time_left"], "23:59");

        let (_, body) = call(&router, Method::POST, "/start_stop").await;
        assert_eq!(body["status"], "stopped");
        assert_eq!(scheduler.active(), 0);
    }

    #[tokio::test]
    async fn reset_returns_initial_clock() {
        let (router, scheduler, cue) = setup();
        call(&router, Method::POST, "/break/increment").await;
        call(&router, Method::POST, "/start_stop").await;
        scheduler.advance(30);

        let (status, body) = call(&router, Method::POST, "/reset").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "stopped");
        assert_eq!(body["clock"]["break_length"], 5);
        assert_eq!(body["clock"]["time_left"], "25:00");
        assert_eq!(cue.events(), vec![CueEvent::Stop, CueEvent::Rewind]);
    }

    #[tokio::test]
    async fn events_stream_current_clock_then_changes() {
        use futures::StreamExt;

        let (router, _, _) = setup();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/events")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let mut frames = response.into_body().into_data_stream();

        let first = frames.next().await.expect("frame").expect("bytes");
        let first = String::from_utf8_lossy(&first).to_string();
        assert!(first.contains("event: clock"));
        assert!(first.contains("\"time_left\":\"25:00\""));

        call(&router, Method::POST, "/session/decrement").await;
        let second = frames.next().await.expect("frame").expect("bytes");
        assert!(String::from_utf8_lossy(&second).contains("\"time_left\":\"24:00\""));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (router, _, _) = setup();
        let (status, body) = call(&router, Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (router, _, _) = setup();
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/pause")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
