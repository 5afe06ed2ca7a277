//! State management module
//!
//! The dial's mutable state and the controller that owns it exclusively.

pub mod dial_state;
pub mod dial_timer;

// Re-export main types
pub use dial_state::{DialPhase, DialSnapshot, DialState};
pub use dial_timer::{DialTimer, DEFAULT_TICK_PERIOD};
