//! Countdown tick source

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant};
use tracing::debug;

use crate::state::DialTimer;

/// Periodic tick source for one running countdown.
///
/// Fires one tick per period, the first a full period after start, and runs
/// until the dial reports the countdown is over or the cancel channel
/// signals. `pause()` and the zero-reached tick cancel through the channel,
/// so no further tick is scheduled afterwards; a tick already in flight is
/// discarded by the running guard in [`DialTimer::on_tick`].
pub async fn countdown_tick_task(dial: Arc<DialTimer>, mut cancel_rx: watch::Receiver<bool>) {
    let period = dial.tick_period();
    let mut ticks = interval_at(Instant::now() + period, period);
    debug!(?period, "countdown ticker started");

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                if !dial.on_tick() {
                    break;
                }
            }
            _ = cancel_rx.changed() => {
                // Cancelled, or the controller dropped the handle.
                break;
            }
        }
    }

    debug!("countdown ticker stopped");
}
