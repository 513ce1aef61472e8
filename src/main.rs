//! Focus Clock - A 25+5 interval clock served over HTTP
//!
//! This is the main entry point for the focus-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use focus_clock::{
    api::create_router,
    config::Config,
    services::check_player_available,
    state::{AppState, TimerController},
    tasks::TokioScheduler,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // A missing player only costs us the sound, never the clock
    let audio = config.audio_cue()?;
    if let Some(program) = config.player_program() {
        if let Err(e) = check_player_available(&program).await {
            warn!("{}", e);
        }
    }

    let controller = TimerController::new(Arc::new(TokioScheduler::new()), audio);
    let state = Arc::new(AppState::new(config.port, config.host.clone(), controller));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /break/increment   - Lengthen the break");
    info!("  POST /break/decrement   - Shorten the break");
    info!("  POST /session/increment - Lengthen the session");
    info!("  POST /session/decrement - Shorten the session");
    info!("  POST /start_stop        - Start or pause the countdown");
    info!("  POST /reset             - Restore the 25 + 5 defaults");
    info!("  GET  /status            - Current clock and server info");
    info!("  GET  /events            - Clock updates as server-sent events");
    info!("  GET  /health            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    // Make sure no tick outlives the server
    if let Err(e) = state.controller.shutdown() {
        warn!("Failed to stop the clock cleanly: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
