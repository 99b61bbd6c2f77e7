//! State management module
//!
//! This module contains the countdown engine and the shared application
//! state that wires it to the HTTP API and the tick task.

pub mod countdown;
pub mod app_state;

// Re-export main types
pub use countdown::{CountdownEngine, CountdownSnapshot, Status, TickOutcome};
pub use app_state::AppState;
