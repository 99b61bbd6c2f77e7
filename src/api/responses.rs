//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::CountdownSnapshot;

/// Request body for setting a new countdown duration.
///
/// Components are optional and default to zero; negative values are
/// coerced to zero rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetDurationRequest {
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
}

impl SetDurationRequest {
    /// Coerce each component to a non-negative count
    pub fn components(&self) -> (u64, u64, u64) {
        (
            self.hours.max(0) as u64,
            self.minutes.max(0) as u64,
            self.seconds.max(0) as u64,
        )
    }
}

/// API response structure for countdown control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub countdown: CountdownSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, countdown: CountdownSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }

    /// Create a response for an applied operation
    pub fn ok(message: String, countdown: CountdownSnapshot) -> Self {
        Self::new("ok".to_string(), message, countdown)
    }

    /// Create a response for a silently ignored operation
    pub fn ignored(message: String, countdown: CountdownSnapshot) -> Self {
        Self::new("ignored".to_string(), message, countdown)
    }
}

/// Full status response with countdown and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub countdown: CountdownSnapshot,
    /// Whether a start action would currently have an effect
    pub can_start: bool,
    /// Next pause-toggle action (`pause` or `resume`), absent when the
    /// toggle is non-actionable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_label: Option<String>,
    pub last_expired_at: Option<DateTime<Utc>>,
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
