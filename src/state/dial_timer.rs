//! Dial timer controller
//!
//! [`DialTimer`] owns the dial's mutable state and its countdown lifecycle.
//! Pointer events and tick events arrive as plain method calls from
//! independent sources; the internal lock serializes them, so no caller
//! needs to know about the other. Guarded operations whose precondition
//! fails (pausing a stopped dial, starting an empty one, dragging a
//! disabled one) are silent no-ops rather than errors.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::angle;
use crate::events::DialEvent;
use crate::geometry::DialGeometry;
use crate::render::RenderState;
use crate::state::{DialSnapshot, DialState};
use crate::tasks::countdown_tick_task;

/// Default countdown tick period: one second per tick.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Controller for one dial and its single active countdown.
#[derive(Debug)]
pub struct DialTimer {
    state: Mutex<DialState>,
    geometry: DialGeometry,
    tick_period: Duration,
    /// Listener notifications; dropped silently when nobody subscribed.
    events_tx: broadcast::Sender<DialEvent>,
    /// Frame counter bumped on every redraw request.
    redraw_tx: watch::Sender<u64>,
    /// Keep one receiver alive to prevent channel closure
    _redraw_rx: watch::Receiver<u64>,
    /// Cancellation handle for the currently running ticker, if any.
    ticker: Mutex<Option<watch::Sender<bool>>>,
    /// Last lifecycle action and when it happened.
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl DialTimer {
    /// Create an idle dial with the default one-second tick.
    pub fn new(geometry: DialGeometry) -> Self {
        let (events_tx, _) = broadcast::channel(100);
        let (redraw_tx, redraw_rx) = watch::channel(0);

        Self {
            state: Mutex::new(DialState::new()),
            geometry,
            tick_period: DEFAULT_TICK_PERIOD,
            events_tx,
            redraw_tx,
            _redraw_rx: redraw_rx,
            ticker: Mutex::new(None),
            last_action: Mutex::new(None),
        }
    }

    /// Override the tick period (the countdown still decrements one second
    /// of dial time per tick).
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn geometry(&self) -> DialGeometry {
        self.geometry
    }

    pub(crate) fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Subscribe to dial notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<DialEvent> {
        self.events_tx.subscribe()
    }

    /// Watch redraw requests; the value is a frame counter, the payload is
    /// just "state changed, re-read and repaint".
    pub fn redraw_signal(&self) -> watch::Receiver<u64> {
        self.redraw_tx.subscribe()
    }

    /// Pointer pressed at `(x, y)`. Starts a drag session when the dial is
    /// enabled and the point lands on the handle; ignored otherwise.
    pub fn on_pointer_down(&self, x: f64, y: f64) {
        let mut state = self.state.lock();
        if !state.enabled || !self.geometry.in_handle(x, y, state.current_radian) {
            return;
        }
        state.dragging = true;
        state.pre_radian = angle::radian_from_point(x, y, self.geometry.cx, self.geometry.cy);
        debug!(pre_radian = state.pre_radian, "pointer down in handle");
    }

    /// Pointer moved during a drag session; ignored when not dragging.
    ///
    /// The 0/2π seam needs unwrapping so a drag through the top of the dial
    /// differences as a short arc instead of a near-full-turn jump.
    pub fn on_pointer_move(&self, x: f64, y: f64) {
        let mut state = self.state.lock();
        if !state.dragging || !state.enabled {
            return;
        }
        let temp = angle::radian_from_point(x, y, self.geometry.cx, self.geometry.cy);
        if state.pre_radian > 3.0 * FRAC_PI_2 && temp < FRAC_PI_2 {
            // Clockwise across the top: unwind the previous sample.
            state.pre_radian -= TAU;
        } else if state.pre_radian < FRAC_PI_2 && temp > 3.0 * FRAC_PI_2 {
            // Counterclockwise across the top.
            state.pre_radian = temp + (temp - TAU) - state.pre_radian;
        }
        state.current_radian += temp - state.pre_radian;
        state.pre_radian = temp;
        if state.current_radian < 0.0 {
            state.current_radian = 0.0;
        }
        // No upper clamp: dragging through several revolutions keeps adding
        // turns, and the seconds follow until the next authoritative reset.
        let seconds = angle::time_from_radian(state.current_radian);
        state.remaining_seconds = seconds;
        drop(state);

        self.emit(DialEvent::SetValueChanging(seconds));
        self.request_redraw();
    }

    /// Pointer released; ends the drag session and commits the set value.
    pub fn on_pointer_up(&self) {
        let mut state = self.state.lock();
        if !state.dragging || !state.enabled {
            return;
        }
        state.dragging = false;
        let seconds = state.remaining_seconds;
        drop(state);

        debug!(seconds, "drag released");
        self.note_action("set");
        self.emit(DialEvent::SetValueChanged(seconds));
    }

    /// Start the countdown. No-op unless some time is set and the dial is
    /// not already running.
    pub fn start(self: &Arc<Self>) {
        let seconds = {
            let mut state = self.state.lock();
            if state.current_radian <= 0.0 || state.running {
                return;
            }
            state.running = true;
            state.remaining_seconds
        };

        let (cancel_tx, cancel_rx) = watch::channel(false);
        *self.ticker.lock() = Some(cancel_tx);
        tokio::spawn(countdown_tick_task(Arc::clone(self), cancel_rx));

        info!(seconds, "countdown started");
        self.note_action("start");
        self.emit(DialEvent::Started(seconds));
    }

    /// Pause a running countdown, retaining the remaining time. The ticker
    /// is cancelled before the notification goes out; a tick already in
    /// flight is discarded by the running guard in [`Self::on_tick`].
    pub fn pause(&self) {
        let seconds = {
            let mut state = self.state.lock();
            if !state.running {
                return;
            }
            state.running = false;
            state.remaining_seconds
        };

        self.cancel_ticker();
        info!(seconds, "countdown paused");
        self.note_action("pause");
        self.emit(DialEvent::Paused(seconds));
    }

    /// Advance the countdown by one tick. Returns whether the tick source
    /// should keep firing.
    ///
    /// While time remains, each tick takes one second of arc and one second
    /// of time off the dial. The tick after the final decrement forces both
    /// to zero, cancels the ticker and reports the stop. Ticks arriving
    /// while not running change nothing.
    pub fn on_tick(&self) -> bool {
        let mut state = self.state.lock();
        if !state.running {
            debug!("tick ignored, countdown not running");
            return false;
        }
        let (event, keep_ticking) = if state.current_radian > 0.0 && state.remaining_seconds > 0 {
            state.current_radian -= angle::SECOND_ARC;
            state.remaining_seconds -= 1;
            (DialEvent::TimingValueChanged(state.remaining_seconds), true)
        } else {
            state.current_radian = 0.0;
            state.remaining_seconds = 0;
            state.running = false;
            (DialEvent::Stopped, false)
        };
        drop(state);

        if !keep_ticking {
            self.cancel_ticker();
            info!("countdown finished");
            self.note_action("stop");
        }
        debug!(?event, "tick handled");
        self.emit(event);
        self.request_redraw();
        keep_ticking
    }

    /// Programmatic reset of the dial value, e.g. from a preset button.
    /// Negative input is ignored, not an error.
    pub fn set_current_time(&self, seconds: i64) {
        if seconds < 0 {
            return;
        }
        let seconds = seconds as u64;
        {
            let mut state = self.state.lock();
            state.remaining_seconds = seconds;
            state.current_radian = angle::radian_from_time(seconds);
        }

        debug!(seconds, "time set");
        self.note_action("set");
        self.emit(DialEvent::SetValueChanged(seconds));
        self.request_redraw();
    }

    /// Remaining time in seconds.
    pub fn current_time(&self) -> u64 {
        self.state.lock().remaining_seconds
    }

    /// Handle position, radians clockwise from the top.
    pub fn current_radian(&self) -> f64 {
        self.state.lock().current_radian
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn is_dragging(&self) -> bool {
        self.state.lock().dragging
    }

    pub fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    /// Gate pointer input; a disabled dial ignores drags but keeps ticking.
    pub fn set_enabled(&self, enabled: bool) {
        self.state.lock().enabled = enabled;
    }

    pub fn set_hint_text(&self, hint: impl Into<String>) {
        self.state.lock().hint_text = hint.into();
        self.request_redraw();
    }

    /// Read model for the renderer: everything one repaint needs.
    pub fn render_state(&self) -> RenderState {
        let state = self.state.lock();
        RenderState {
            radian: state.current_radian,
            remaining_seconds: state.remaining_seconds,
            running: state.running,
            dragging: state.dragging,
            phase: state.phase(),
            hint_text: state.hint_text.clone(),
        }
    }

    /// The angle is the only persisted value.
    pub fn snapshot(&self) -> DialSnapshot {
        DialSnapshot {
            radian: self.state.lock().current_radian,
        }
    }

    /// Reinstate a persisted angle and recompute the seconds from it.
    pub fn restore(&self, snapshot: &DialSnapshot) {
        let radian = snapshot.radian.max(0.0);
        {
            let mut state = self.state.lock();
            state.current_radian = radian;
            state.remaining_seconds = angle::time_from_radian(radian);
        }
        self.request_redraw();
    }

    /// Last lifecycle action and when it happened.
    pub fn last_action(&self) -> Option<(String, DateTime<Utc>)> {
        self.last_action.lock().clone()
    }

    fn cancel_ticker(&self) {
        if let Some(cancel_tx) = self.ticker.lock().take() {
            let _ = cancel_tx.send(true);
        }
    }

    fn note_action(&self, action: &str) {
        *self.last_action.lock() = Some((action.to_string(), Utc::now()));
    }

    fn emit(&self, event: DialEvent) {
        // No subscribers means no listener is registered; drop the event.
        let _ = self.events_tx.send(event);
    }

    fn request_redraw(&self) {
        self.redraw_tx.send_modify(|frame| *frame += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn dial() -> Arc<DialTimer> {
        Arc::new(DialTimer::new(DialGeometry::centered(300.0)))
    }

    fn point_at(dial: &DialTimer, radian: f64) -> (f64, f64) {
        dial.geometry().handle_center(radian)
    }

    fn drain(events: &mut broadcast::Receiver<DialEvent>) -> Vec<DialEvent> {
        let mut all = Vec::new();
        while let Ok(event) = events.try_recv() {
            all.push(event);
        }
        all
    }

    #[tokio::test]
    async fn start_with_no_time_set_is_a_noop() {
        let dial = dial();
        let mut events = dial.subscribe();

        dial.start();

        assert!(!dial.is_running());
        assert!(drain(&mut events).is_empty());
    }

    #[tokio::test]
    async fn countdown_counts_down_and_stops() {
        let dial = dial();
        let mut events = dial.subscribe();

        dial.set_current_time(10);
        dial.start();
        assert_eq!(events.try_recv().unwrap(), DialEvent::SetValueChanged(10));
        assert_eq!(events.try_recv().unwrap(), DialEvent::Started(10));
        assert!(dial.is_running());

        for expected in (0..10).rev() {
            assert!(dial.on_tick());
            assert_eq!(
                events.try_recv().unwrap(),
                DialEvent::TimingValueChanged(expected)
            );
        }

        // The tick after the final decrement shuts the countdown down.
        assert!(!dial.on_tick());
        assert_eq!(events.try_recv().unwrap(), DialEvent::Stopped);
        assert!(!dial.is_running());
        assert_eq!(dial.current_time(), 0);
        assert_eq!(dial.current_radian(), 0.0);
    }

    #[tokio::test]
    async fn pause_halts_the_countdown_and_stray_ticks_change_nothing() {
        let dial = dial();
        let mut events = dial.subscribe();

        dial.set_current_time(30);
        dial.start();
        for _ in 0..5 {
            assert!(dial.on_tick());
        }
        assert_eq!(dial.current_time(), 25);

        dial.pause();
        assert!(!dial.is_running());
        assert_eq!(drain(&mut events).last(), Some(&DialEvent::Paused(25)));

        // A tick source that fires once more after cancellation.
        assert!(!dial.on_tick());
        assert_eq!(dial.current_time(), 25);
        assert!(drain(&mut events).is_empty());
    }

    #[tokio::test]
    async fn pause_when_not_running_is_a_noop() {
        let dial = dial();
        dial.set_current_time(30);
        let mut events = dial.subscribe();

        dial.pause();

        assert!(drain(&mut events).is_empty());
        assert_eq!(dial.current_time(), 30);
    }

    #[tokio::test]
    async fn start_while_running_is_a_noop() {
        let dial = dial();
        dial.set_current_time(30);
        let mut events = dial.subscribe();

        dial.start();
        dial.start();

        let started = drain(&mut events)
            .into_iter()
            .filter(|event| matches!(event, DialEvent::Started(_)))
            .count();
        assert_eq!(started, 1);
    }

    #[test]
    fn forward_wrap_drags_through_the_top_as_a_short_arc() {
        let dial = dial();
        dial.set_current_time(2757); // handle just past 3π/2

        let before = dial.current_radian();
        assert!(before > 3.0 * FRAC_PI_2);
        let (x, y) = point_at(&dial, before);
        dial.on_pointer_down(x, y);
        assert!(dial.is_dragging());

        let (x, y) = point_at(&dial, FRAC_PI_2 - 0.1);
        dial.on_pointer_move(x, y);

        let delta = dial.current_radian() - before;
        assert!(delta > 0.0 && delta < PI, "expected a short arc, got {delta}");
        // Crossing the top accumulated a full revolution of drift.
        assert!(dial.current_radian() > TAU);
        assert!(dial.current_time() > angle::FULL_TURN_SECONDS);
        assert_eq!(
            dial.current_time(),
            angle::time_from_radian(dial.current_radian())
        );
    }

    #[test]
    fn counterclockwise_wrap_applies_asymmetric_correction() {
        let dial = dial();
        dial.set_current_time(57); // handle just clockwise of the top

        let before = dial.current_radian();
        assert!(before < FRAC_PI_2);
        let (x, y) = point_at(&dial, before);
        dial.on_pointer_down(x, y);

        let temp = 3.0 * FRAC_PI_2 + 0.1;
        let (x, y) = point_at(&dial, temp);
        dial.on_pointer_move(x, y);

        // The correction folds the crossing into a positive delta: the dial
        // lands at 2·previous + 2π − target instead of winding below zero.
        let expected = 2.0 * before + TAU - temp;
        assert!((dial.current_radian() - expected).abs() < 1e-9);
    }

    #[test]
    fn drag_clamps_at_zero() {
        let dial = dial();
        dial.set_current_time(57);

        let before = dial.current_radian();
        let (x, y) = point_at(&dial, before);
        dial.on_pointer_down(x, y);
        let (x, y) = point_at(&dial, 3.0 * FRAC_PI_2 + 0.1);
        dial.on_pointer_move(x, y);
        // A large counterclockwise sweep from here runs the angle negative.
        let (x, y) = point_at(&dial, 2.0);
        dial.on_pointer_move(x, y);

        assert_eq!(dial.current_radian(), 0.0);
        assert_eq!(dial.current_time(), 0);

        let mut events = dial.subscribe();
        dial.on_pointer_up();
        assert_eq!(drain(&mut events), vec![DialEvent::SetValueChanged(0)]);
    }

    #[test]
    fn drag_streams_changing_and_commits_changed_once() {
        let dial = dial();
        let mut events = dial.subscribe();

        let (x, y) = point_at(&dial, 0.0);
        dial.on_pointer_down(x, y);
        for step in 1..=8 {
            let (x, y) = point_at(&dial, step as f64 * 0.1);
            dial.on_pointer_move(x, y);
        }
        dial.on_pointer_up();
        assert!(!dial.is_dragging());

        let all = drain(&mut events);
        let changing = all
            .iter()
            .filter(|event| matches!(event, DialEvent::SetValueChanging(_)))
            .count();
        assert_eq!(changing, 8);

        let final_seconds = dial.current_time();
        assert_eq!(all.last(), Some(&DialEvent::SetValueChanged(final_seconds)));
        let changed = all
            .iter()
            .filter(|event| matches!(event, DialEvent::SetValueChanged(_)))
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn pointer_up_without_drag_is_a_noop() {
        let dial = dial();
        let mut events = dial.subscribe();

        dial.on_pointer_up();

        assert!(drain(&mut events).is_empty());
    }

    #[test]
    fn pointer_down_outside_the_handle_is_ignored() {
        let dial = dial();
        let geometry = dial.geometry();

        dial.on_pointer_down(geometry.cx, geometry.cy);
        assert!(!dial.is_dragging());

        // Handle sits at the top; the opposite rim point misses it.
        let (x, y) = point_at(&dial, PI);
        dial.on_pointer_down(x, y);
        assert!(!dial.is_dragging());
    }

    #[test]
    fn disabled_dial_ignores_pointer_input() {
        let dial = dial();
        let mut events = dial.subscribe();
        dial.set_enabled(false);

        let (x, y) = point_at(&dial, 0.0);
        dial.on_pointer_down(x, y);

        assert!(!dial.is_dragging());
        assert!(drain(&mut events).is_empty());
    }

    #[test]
    fn negative_set_time_is_ignored() {
        let dial = dial();
        dial.set_current_time(100);
        let radian = dial.current_radian();
        let mut events = dial.subscribe();

        dial.set_current_time(-5);

        assert_eq!(dial.current_time(), 100);
        assert_eq!(dial.current_radian(), radian);
        assert!(drain(&mut events).is_empty());
    }

    #[test]
    fn snapshot_restore_recomputes_time_from_the_angle() {
        let dial = dial();
        dial.set_current_time(1500);
        let snapshot = dial.snapshot();

        let restored = self::dial();
        restored.restore(&snapshot);

        assert_eq!(restored.current_time(), 1500);
        assert_eq!(restored.current_radian(), snapshot.radian);
    }

    #[tokio::test]
    async fn redraw_signal_bumps_on_updates() {
        let dial = dial();
        let redraw = dial.redraw_signal();
        let frame = *redraw.borrow();

        dial.set_current_time(10);
        let after_set = *redraw.borrow();
        assert!(after_set > frame);

        dial.start();
        dial.on_tick();
        assert!(*redraw.borrow() > after_set);
    }

    #[tokio::test]
    async fn phase_follows_the_lifecycle() {
        let dial = dial();
        assert_eq!(dial.render_state().phase, crate::state::DialPhase::Idle);

        dial.set_current_time(60);
        assert_eq!(dial.render_state().phase, crate::state::DialPhase::Paused);

        dial.start();
        assert_eq!(dial.render_state().phase, crate::state::DialPhase::Running);
        assert_eq!(dial.last_action().map(|(action, _)| action).as_deref(), Some("start"));

        dial.pause();
        assert_eq!(dial.render_state().phase, crate::state::DialPhase::Paused);

        let (x, y) = point_at(&dial, dial.current_radian());
        dial.on_pointer_down(x, y);
        assert_eq!(dial.render_state().phase, crate::state::DialPhase::Dragging);
    }

    #[test]
    fn hint_text_reaches_the_render_state() {
        let dial = dial();
        dial.set_hint_text("focus");

        let render = dial.render_state();
        assert_eq!(render.hint_text, "focus");
        assert_eq!(render.clock_label(), "00:00");
    }
}
