//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Status};
use super::responses::{ApiResponse, HealthResponse, SetDurationRequest, StatusResponse};

/// Handle POST /set - Configure a new countdown duration
pub async fn set_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetDurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let (hours, minutes, seconds) = request.components();

    match state.set_duration(hours, minutes, seconds) {
        Ok((countdown, true)) => {
            info!("Set endpoint called - duration set to {}", countdown.display);
            Ok(Json(ApiResponse::ok(
                format!("Countdown set to {}", countdown.display),
                countdown,
            )))
        }
        Ok((countdown, false)) => {
            info!("Set endpoint called while countdown is live - ignored");
            Ok(Json(ApiResponse::ignored(
                "Countdown is live; reset before setting a new duration".to_string(),
                countdown,
            )))
        }
        Err(e) => {
            error!("Failed to set countdown duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok((countdown, true)) => {
            info!("Start endpoint called - countdown running at {}", countdown.display);
            Ok(Json(ApiResponse::ok(
                "Countdown started".to_string(),
                countdown,
            )))
        }
        Ok((countdown, false)) => {
            let message = if countdown.remaining_seconds == 0 {
                "No duration configured; set a time first"
            } else {
                "Countdown is already running"
            };
            info!("Start endpoint called - {}", message);
            Ok(Json(ApiResponse::ignored(message.to_string(), countdown)))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Toggle between running and paused
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause_toggle() {
        Ok((countdown, true)) => {
            let message = match countdown.status {
                Status::Paused => "Countdown paused",
                _ => "Countdown resumed",
            };
            info!("Pause endpoint called - {}", message);
            Ok(Json(ApiResponse::ok(message.to_string(), countdown)))
        }
        Ok((countdown, false)) => {
            info!("Pause endpoint called with nothing to pause - ignored");
            Ok(Json(ApiResponse::ignored(
                "Countdown is not running".to_string(),
                countdown,
            )))
        }
        Err(e) => {
            error!("Failed to toggle countdown pause: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Return the countdown to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok((countdown, _)) => {
            info!("Reset endpoint called - countdown cleared");
            Ok(Json(ApiResponse::ok(
                "Countdown reset".to_string(),
                countdown,
            )))
        }
        Err(e) => {
            error!("Failed to reset countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current countdown and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let countdown = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get countdown snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let can_start = match state.can_start() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to check countdown state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let pause_label = match countdown.status {
        Status::Running => Some("pause".to_string()),
        Status::Paused => Some("resume".to_string()),
        Status::Idle | Status::Expired => None,
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        countdown,
        can_start,
        pause_label,
        last_expired_at: state.last_expired_at(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
