//! Countdown tick background task

use std::{sync::Arc, time::Duration};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::state::{AppState, Status, TickOutcome};

/// Background task that drives the one-second countdown cadence.
///
/// Entry into the ticking phase is level-checked: every pass over the
/// outer loop consults the engine itself, so a start applied before this
/// task subscribed (or while the control channel lagged) is still picked
/// up. The control channel only wakes the loop; it never decides.
///
/// While the countdown stays running the task holds a
/// `tokio::time::interval`. The interval is scoped to the running phase:
/// pause, reset and expiry all leave the inner loop, dropping it, so no
/// tick source outlives the state that justified it.
pub async fn countdown_tick_task(state: Arc<AppState>) {
    info!("Starting countdown tick task");

    let mut control_rx = state.control_tx.subscribe();

    loop {
        // Consult the engine, not the last event; a Running engine always
        // gets a tick source even if the transition itself was missed
        let running = match state.snapshot() {
            Ok(snapshot) => snapshot.status == Status::Running,
            Err(e) => {
                error!("Countdown state unavailable: {}", e);
                sleep(Duration::from_secs(1)).await;
                continue;
            }
        };

        if !running {
            // Idle until the next control transition, then re-check
            match control_rx.recv().await {
                Ok(snapshot) => {
                    debug!("Control event (status {:?}), re-checking state", snapshot.status);
                    continue;
                }
                Err(RecvError::Lagged(missed)) => {
                    debug!("Control channel lagged by {} events, re-checking state", missed);
                    continue;
                }
                Err(RecvError::Closed) => {
                    info!("Control channel closed, stopping tick task");
                    return;
                }
            }
        }

        info!("Countdown running, acquiring tick source");

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first interval tick completes immediately; the countdown
        // should only decrement after a full second
        interval.tick().await;

        loop {
            tokio::select! {
                // One second elapsed - decrement the countdown
                _ = interval.tick() => {
                    match state.apply_tick() {
                        Ok(TickOutcome::Counting(remaining)) => {
                            debug!("Countdown tick, {} seconds remaining", remaining);
                        }
                        Ok(TickOutcome::Expired) => {
                            info!("Countdown reached zero, releasing tick source");
                            break;
                        }
                        Ok(TickOutcome::Ignored) => {
                            // Engine left Running between wakeups
                            debug!("Tick ignored, releasing tick source");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to apply countdown tick: {}", e);
                            break;
                        }
                    }
                }

                // Control transition - keep ticking only while running
                event = control_rx.recv() => {
                    match event {
                        Ok(snapshot) if snapshot.status == Status::Running => {
                            debug!("Control event while running, continuing ticks");
                        }
                        Ok(snapshot) => {
                            info!("Countdown left running (status {:?}), releasing tick source",
                                  snapshot.status);
                            break;
                        }
                        Err(RecvError::Lagged(missed)) => {
                            // Missed transitions; drop the interval and let
                            // the outer level check decide
                            debug!("Control channel lagged by {} events, re-checking state", missed);
                            break;
                        }
                        Err(RecvError::Closed) => {
                            info!("Control channel closed, stopping tick task");
                            return;
                        }
                    }
                }
            }
        }
    }
}
