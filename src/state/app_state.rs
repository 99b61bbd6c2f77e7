//! Shared application state around the countdown engine

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{CountdownEngine, CountdownSnapshot, TickOutcome};

/// Main application state: the countdown engine plus the channels that
/// connect it to the tick task and to API observers
#[derive(Debug)]
pub struct AppState {
    /// The countdown engine, shared between handlers and the tick task
    pub countdown: Arc<Mutex<CountdownEngine>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// When the countdown last reached zero
    pub last_expired_at: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Control-transition notifications consumed by the tick task
    pub control_tx: broadcast::Sender<CountdownSnapshot>,
    /// Latest snapshot for observers
    pub snapshot_tx: watch::Sender<CountdownSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<CountdownSnapshot>,
    /// Expiry notifications, sent exactly once per completed countdown
    pub expiry_tx: broadcast::Sender<DateTime<Utc>>,
    _expiry_rx: broadcast::Receiver<DateTime<Utc>>,
}

impl AppState {
    /// Create a new AppState with an idle countdown
    pub fn new(port: u16, host: String) -> Self {
        let engine = CountdownEngine::new();
        let (control_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let (expiry_tx, expiry_rx) = broadcast::channel(16);

        Self {
            countdown: Arc::new(Mutex::new(engine)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            last_expired_at: Arc::new(Mutex::new(None)),
            control_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            expiry_tx,
            _expiry_rx: expiry_rx,
        }
    }

    /// Apply a control operation to the engine and broadcast the result.
    ///
    /// The closure returns whether the engine accepted the operation; the
    /// snapshot is published either way so observers stay current.
    fn apply<F>(&self, action: &str, op: F) -> Result<(CountdownSnapshot, bool), String>
    where
        F: FnOnce(&mut CountdownEngine) -> bool,
    {
        let mut engine = self.countdown.lock()
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))?;

        let applied = op(&mut engine);
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        // Notify the tick task and any snapshot watchers
        if let Err(e) = self.control_tx.send(snapshot.clone()) {
            warn!("Failed to send control notification: {}", e);
        }
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send snapshot update: {}", e);
        }

        Ok((snapshot, applied))
    }

    /// Configure a new countdown duration
    pub fn set_duration(&self, hours: u64, minutes: u64, seconds: u64)
        -> Result<(CountdownSnapshot, bool), String>
    {
        info!("Setting countdown duration to {}h {}m {}s", hours, minutes, seconds);
        self.apply("set", |engine| engine.set_duration(hours, minutes, seconds))
    }

    /// Start (or resume) the countdown
    pub fn start(&self) -> Result<(CountdownSnapshot, bool), String> {
        info!("Starting countdown");
        self.apply("start", |engine| engine.start())
    }

    /// Toggle between running and paused
    pub fn pause_toggle(&self) -> Result<(CountdownSnapshot, bool), String> {
        info!("Toggling countdown pause");
        self.apply("pause", |engine| engine.pause_toggle())
    }

    /// Reset the countdown to idle and clear the configured duration
    pub fn reset(&self) -> Result<(CountdownSnapshot, bool), String> {
        info!("Resetting countdown");
        self.apply("reset", |engine| {
            engine.reset();
            true
        })
    }

    /// Apply one tick from the tick task.
    ///
    /// Publishes the updated snapshot to watchers but not to the control
    /// channel; ticks are not control transitions. On expiry, records the
    /// timestamp and sends the single expiry notification.
    pub fn apply_tick(&self) -> Result<TickOutcome, String> {
        let mut engine = self.countdown.lock()
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))?;

        let outcome = engine.tick();
        let snapshot = engine.snapshot();
        drop(engine);

        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send snapshot update: {}", e);
        }

        if outcome == TickOutcome::Expired {
            let now = Utc::now();
            info!("Countdown expired - time is up");
            if let Ok(mut last_expired) = self.last_expired_at.lock() {
                *last_expired = Some(now);
            }
            if let Err(e) = self.expiry_tx.send(now) {
                warn!("Failed to send expiry notification: {}", e);
            }
        }

        Ok(outcome)
    }

    /// Get the current countdown snapshot
    pub fn snapshot(&self) -> Result<CountdownSnapshot, String> {
        self.countdown.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))
    }

    /// Whether a start action would currently have an effect
    pub fn can_start(&self) -> Result<bool, String> {
        self.countdown.lock()
            .map(|engine| engine.can_start())
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))
    }

    /// Get the timestamp of the most recent expiry, if any
    pub fn last_expired_at(&self) -> Option<DateTime<Utc>> {
        self.last_expired_at.lock().ok().and_then(|t| *t)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
