//! Listener notifications emitted by the dial
//!
//! Hosts subscribe through [`DialTimer::subscribe`](crate::DialTimer::subscribe)
//! and receive one event per observable transition. The two set-value
//! notifications stay distinct: `SetValueChanging` streams while the handle
//! is being dragged, `SetValueChanged` fires once on release or on a
//! programmatic set, and hosts may bind different feedback to each.

/// A single dial notification, carrying the relevant seconds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialEvent {
    /// Countdown started with this many seconds on the dial.
    Started(u64),
    /// Countdown paused with this many seconds left.
    Paused(u64),
    /// Countdown reached zero and stopped.
    Stopped,
    /// One countdown second elapsed; this many seconds remain.
    TimingValueChanged(u64),
    /// The handle is being dragged; the dial currently reads this value.
    SetValueChanging(u64),
    /// The set value was committed, by drag release or programmatic set.
    SetValueChanged(u64),
}
