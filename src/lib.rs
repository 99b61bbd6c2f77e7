//! Ticktock - A state-managed HTTP countdown timer
//!
//! This library provides a countdown engine with start/pause/resume/reset
//! control, a one-second tick task, and an HTTP API for driving it.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
