//! Dial state structure and snapshot

use serde::{Deserialize, Serialize};

use crate::angle;

/// Logical state of the dial, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialPhase {
    /// No time set, nothing running.
    Idle,
    /// Pointer down in the handle, value being adjusted.
    Dragging,
    /// Countdown active, ticking once per second.
    Running,
    /// Time retained but the countdown is not running.
    Paused,
}

/// Mutable dial state, owned exclusively by the controller.
///
/// `current_radian` and `remaining_seconds` stay mutually consistent: every
/// authoritative update recomputes one from the other through the fixed
/// 3600-seconds-per-revolution conversion.
#[derive(Debug, Clone)]
pub struct DialState {
    /// Handle position, radians clockwise from the top; 0 = no time set.
    pub current_radian: f64,
    pub remaining_seconds: u64,
    pub running: bool,
    pub dragging: bool,
    /// Last sampled angle during an active drag; meaningless otherwise.
    pub pre_radian: f64,
    /// Pointer-down gate; a disabled dial ignores all drag input.
    pub enabled: bool,
    pub hint_text: String,
}

impl DialState {
    pub fn new() -> Self {
        Self {
            current_radian: 0.0,
            remaining_seconds: 0,
            running: false,
            dragging: false,
            pre_radian: 0.0,
            enabled: true,
            hint_text: String::new(),
        }
    }

    pub fn phase(&self) -> DialPhase {
        if self.dragging {
            DialPhase::Dragging
        } else if self.running {
            DialPhase::Running
        } else if self.remaining_seconds > 0 {
            DialPhase::Paused
        } else {
            DialPhase::Idle
        }
    }
}

impl Default for DialState {
    fn default() -> Self {
        Self::new()
    }
}

/// The one value worth persisting across widget teardown: the dial angle.
/// Restoring it recomputes the seconds through the converter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialSnapshot {
    pub radian: f64,
}

impl DialSnapshot {
    pub fn remaining_seconds(&self) -> u64 {
        angle::time_from_radian(self.radian)
    }
}
