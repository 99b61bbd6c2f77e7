//! Ticktock - A state-managed HTTP countdown timer
//!
//! This is the main entry point for the ticktock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use ticktock::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::countdown_tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("ticktock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting ticktock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Preset a countdown duration if one was given on the command line
    if let Some((hours, minutes, seconds)) = config.initial_duration() {
        if let Err(e) = state.set_duration(hours, minutes, seconds) {
            tracing::error!("Failed to preset countdown duration: {}", e);
        }
    }

    // Start the countdown tick background task
    let tick_state = Arc::clone(&state);
    let tick_handle = tokio::spawn(async move {
        countdown_tick_task(tick_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /set    - Set countdown duration (hours/minutes/seconds)");
    info!("  POST /start  - Start or resume the countdown");
    info!("  POST /pause  - Toggle between running and paused");
    info!("  POST /reset  - Return the countdown to idle");
    info!("  GET  /status - Current countdown and server status");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // The tick task holds the only long-lived interval; stop it with the server
    tick_handle.abort();

    info!("Server shutdown complete");
    Ok(())
}
