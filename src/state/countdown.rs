//! Countdown state machine

use serde::{Deserialize, Serialize};

use crate::utils::format_hms;

/// Lifecycle status of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Result of applying one tick to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown decremented and is still running
    Counting(u64),
    /// This tick brought the countdown to zero
    Expired,
    /// Engine was not running (or already at zero); nothing changed
    Ignored,
}

/// The countdown engine - owns the remaining duration and the
/// running/paused status, and applies all state transitions.
///
/// Pure state: no channels, no timers. The periodic tick source lives in
/// the background task and calls [`CountdownEngine::tick`] once a second
/// while the status is `Running`.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    remaining_seconds: u64,
    configured_seconds: u64,
    status: Status,
}

impl CountdownEngine {
    /// Create a new engine in `Idle` with no duration configured
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            configured_seconds: 0,
            status: Status::Idle,
        }
    }

    /// Set a new countdown duration from hours/minutes/seconds components.
    ///
    /// Accepted only while `Idle` or `Expired`; a live countdown is never
    /// silently re-targeted. Applying a duration from `Expired` returns the
    /// engine to `Idle`, so a fresh `start()` can arm expiry again.
    /// Returns whether the duration was applied.
    pub fn set_duration(&mut self, hours: u64, minutes: u64, seconds: u64) -> bool {
        match self.status {
            Status::Idle | Status::Expired => {
                // No upper bound on the duration; saturate rather than wrap
                let total = hours
                    .saturating_mul(3600)
                    .saturating_add(minutes.saturating_mul(60))
                    .saturating_add(seconds);
                self.configured_seconds = total;
                self.remaining_seconds = total;
                self.status = Status::Idle;
                true
            }
            Status::Running | Status::Paused => false,
        }
    }

    /// Start the countdown.
    ///
    /// No-op unless there is time remaining. Starting while `Paused`
    /// resumes; starting while already `Running` changes nothing.
    /// Returns whether the engine is now freshly running.
    pub fn start(&mut self) -> bool {
        match self.status {
            Status::Idle | Status::Expired if self.remaining_seconds > 0 => {
                self.status = Status::Running;
                true
            }
            Status::Paused => {
                self.status = Status::Running;
                true
            }
            _ => false,
        }
    }

    /// Flip between `Running` and `Paused`; no-op from `Idle`/`Expired`.
    /// Returns whether the status changed.
    pub fn pause_toggle(&mut self) -> bool {
        match self.status {
            Status::Running => {
                self.status = Status::Paused;
                true
            }
            Status::Paused => {
                self.status = Status::Running;
                true
            }
            Status::Idle | Status::Expired => false,
        }
    }

    /// Apply one tick of the one-second cadence.
    ///
    /// Only effective while `Running`. The decrement that reaches zero
    /// transitions to `Expired` exactly once; further ticks are ignored
    /// until a fresh countdown is configured and started.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != Status::Running {
            return TickOutcome::Ignored;
        }
        match self.remaining_seconds {
            0 => TickOutcome::Ignored,
            1 => {
                self.remaining_seconds = 0;
                self.status = Status::Expired;
                TickOutcome::Expired
            }
            n => {
                self.remaining_seconds = n - 1;
                TickOutcome::Counting(self.remaining_seconds)
            }
        }
    }

    /// Return to `Idle` and clear both the remaining and configured
    /// duration. Valid from any state.
    pub fn reset(&mut self) {
        self.remaining_seconds = 0;
        self.configured_seconds = 0;
        self.status = Status::Idle;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn configured_seconds(&self) -> u64 {
        self.configured_seconds
    }

    /// Whether a start action would currently have an effect
    pub fn can_start(&self) -> bool {
        self.status != Status::Running && self.remaining_seconds > 0
    }

    /// Snapshot the current state for broadcasting and API responses
    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            status: self.status,
            remaining_seconds: self.remaining_seconds,
            configured_seconds: self.configured_seconds,
            display: format_hms(self.remaining_seconds),
        }
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable view of the engine at one point in time, as sent over the
/// state-change channels and returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub status: Status,
    pub remaining_seconds: u64,
    pub configured_seconds: u64,
    pub display: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_is_idle_at_zero() {
        let engine = CountdownEngine::new();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.configured_seconds(), 0);
    }

    #[test]
    fn set_duration_computes_total_seconds() {
        let mut engine = CountdownEngine::new();
        assert!(engine.set_duration(1, 1, 1));
        assert_eq!(engine.remaining_seconds(), 3661);
        assert_eq!(engine.configured_seconds(), 3661);

        assert!(engine.set_duration(0, 90, 0));
        assert_eq!(engine.remaining_seconds(), 5400);
    }

    #[test]
    fn set_duration_rejected_while_live() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(0, 0, 10);
        engine.start();
        assert!(!engine.set_duration(0, 0, 99));
        assert_eq!(engine.remaining_seconds(), 10);

        engine.pause_toggle();
        assert!(!engine.set_duration(0, 0, 99));
        assert_eq!(engine.remaining_seconds(), 10);
        assert_eq!(engine.status(), Status::Paused);
    }

    #[test]
    fn start_at_zero_is_a_noop() {
        let mut engine = CountdownEngine::new();
        assert!(!engine.start());
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.remaining_seconds(), 0);
    }

    #[test]
    fn start_while_running_is_idempotent() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(0, 0, 5);
        assert!(engine.start());
        assert!(!engine.start());
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.remaining_seconds(), 5);
    }

    #[test]
    fn start_while_paused_resumes() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(0, 0, 5);
        engine.start();
        engine.pause_toggle();
        assert_eq!(engine.status(), Status::Paused);
        assert!(engine.start());
        assert_eq!(engine.status(), Status::Running);
    }

    #[test]
    fn ticks_reach_expired_after_exactly_n() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(0, 0, 3);
        engine.start();

        assert_eq!(engine.tick(), TickOutcome::Counting(2));
        assert_eq!(engine.tick(), TickOutcome::Counting(1));
        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert_eq!(engine.status(), Status::Expired);
        assert_eq!(engine.remaining_seconds(), 0);

        // Expiry is edge-triggered; further ticks never re-fire or underflow
        assert_eq!(engine.tick(), TickOutcome::Ignored);
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.status(), Status::Expired);
    }

    #[test]
    fn tick_outside_running_is_ignored() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(0, 0, 5);
        assert_eq!(engine.tick(), TickOutcome::Ignored);

        engine.start();
        engine.pause_toggle();
        assert_eq!(engine.tick(), TickOutcome::Ignored);
        assert_eq!(engine.remaining_seconds(), 5);
    }

    #[test]
    fn pause_toggle_round_trip_preserves_remaining() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(0, 0, 7);
        engine.start();
        engine.tick();

        assert!(engine.pause_toggle());
        assert_eq!(engine.status(), Status::Paused);
        assert!(engine.pause_toggle());
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.remaining_seconds(), 6);
    }

    #[test]
    fn pause_toggle_is_a_noop_from_idle_and_expired() {
        let mut engine = CountdownEngine::new();
        assert!(!engine.pause_toggle());

        engine.set_duration(0, 0, 1);
        engine.start();
        engine.tick();
        assert_eq!(engine.status(), Status::Expired);
        assert!(!engine.pause_toggle());
        assert_eq!(engine.status(), Status::Expired);
    }

    #[test]
    fn reset_clears_everything_from_any_state() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(1, 0, 0);
        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.status(), Status::Idle);
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.configured_seconds(), 0);

        engine.set_duration(0, 0, 1);
        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.status(), Status::Idle);
    }

    #[test]
    fn expiry_rearms_after_reset_and_fresh_duration() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(0, 0, 1);
        engine.start();
        assert_eq!(engine.tick(), TickOutcome::Expired);

        // A new duration straight from Expired also re-arms
        assert!(engine.set_duration(0, 0, 2));
        assert_eq!(engine.status(), Status::Idle);
        engine.start();
        assert_eq!(engine.tick(), TickOutcome::Counting(1));
        assert_eq!(engine.tick(), TickOutcome::Expired);
    }

    #[test]
    fn can_start_tracks_status_and_remaining() {
        let mut engine = CountdownEngine::new();
        assert!(!engine.can_start());
        engine.set_duration(0, 0, 3);
        assert!(engine.can_start());
        engine.start();
        assert!(!engine.can_start());
        engine.pause_toggle();
        assert!(engine.can_start());
    }

    #[test]
    fn snapshot_formats_display() {
        let mut engine = CountdownEngine::new();
        engine.set_duration(1, 1, 1);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.display, "01:01:01");
        assert_eq!(snapshot.status, Status::Idle);
    }
}
