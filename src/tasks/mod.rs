//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_tick;

// Re-export main functions
pub use countdown_tick::countdown_tick_task;
