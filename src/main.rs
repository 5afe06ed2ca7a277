//! Dial Timer - drive a dial countdown from the terminal
//!
//! Demo host for the dial widget core: scripts a pointer drag from the top
//! of the dial to the requested preset, starts the countdown, and logs
//! every dial event until it finishes or a shutdown signal arrives.

use std::sync::Arc;

use tracing::{debug, info};

use dial_timer::{angle, config::Config, shutdown_signal, DialEvent, DialGeometry, DialTimer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dial_timer={}", config.log_level()))
        .init();

    info!(
        "Starting dial-timer: {} minute(s), tick every {}ms",
        config.minutes, config.tick_ms
    );

    if config.preset_seconds() == 0 {
        tracing::error!("nothing to count down, preset is zero");
        std::process::exit(1);
    }

    let dial = Arc::new(
        DialTimer::new(DialGeometry::centered(300.0)).with_tick_period(config.tick_period()),
    );
    dial.set_hint_text(config.hint.clone());

    let mut events = dial.subscribe();

    // Walk the handle from the top of the dial to the preset, the way a
    // finger would set it.
    let geometry = dial.geometry();
    let target = angle::radian_from_time(config.preset_seconds() as u64);
    let (x, y) = geometry.handle_center(0.0);
    dial.on_pointer_down(x, y);
    let steps = 24;
    for step in 1..=steps {
        let (x, y) = geometry.handle_center(target * step as f64 / steps as f64);
        dial.on_pointer_move(x, y);
    }
    dial.on_pointer_up();
    debug!(radian = dial.current_radian(), "drag finished");

    // The drag lands within rounding of the preset; settle on it exactly.
    dial.set_current_time(config.preset_seconds());
    dial.start();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(DialEvent::Stopped) => {
                    info!("countdown reached zero");
                    break;
                }
                Ok(DialEvent::TimingValueChanged(seconds)) => {
                    info!("{} ({seconds}s left)", dial.render_state().clock_label());
                }
                Ok(DialEvent::SetValueChanging(seconds)) => {
                    debug!(seconds, "adjusting");
                }
                Ok(event) => info!(?event, "dial event"),
                Err(_) => break,
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                dial.pause();
                break;
            }
        }
    }

    if let Some((action, at)) = dial.last_action() {
        debug!("last action: {action} at {at}");
    }
    info!("final state: {}", serde_json::to_string(&dial.render_state())?);
    Ok(())
}
