//! Renderer-facing read model
//!
//! Renderers never mutate the dial; on each repaint they read one
//! [`RenderState`] and draw from it.

use serde::{Deserialize, Serialize};

use crate::state::DialPhase;

/// Snapshot of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Handle position, radians clockwise from the top.
    pub radian: f64,
    pub remaining_seconds: u64,
    pub running: bool,
    pub dragging: bool,
    pub phase: DialPhase,
    /// Cosmetic label drawn under the clock readout.
    pub hint_text: String,
}

impl RenderState {
    /// Remaining time as the `HH:MM` readout drawn in the dial center.
    pub fn clock_label(&self) -> String {
        let hours = self.remaining_seconds / 3600;
        let minutes = (self.remaining_seconds - hours * 3600) / 60;
        format!("{hours:02}:{minutes:02}")
    }
}
