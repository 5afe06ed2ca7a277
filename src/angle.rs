//! Angle/time conversion for the dial
//!
//! The dial measures angles clockwise from the top (12 o'clock), in radians.
//! One full revolution represents 3600 seconds, so one second of countdown
//! is `2π/3600` of arc.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Seconds represented by a full revolution of the dial.
pub const FULL_TURN_SECONDS: u64 = 3600;

/// Arc swept by one second of countdown.
pub const SECOND_ARC: f64 = TAU / FULL_TURN_SECONDS as f64;

/// Compute the dial angle of a pointer position relative to the dial center.
///
/// Returns a value in `[0, 2π)`, clockwise from the top. The raw arctangent
/// of `(x - cx) / (cy - y)` is adjusted per quadrant; points on the
/// horizontal center line are handled explicitly so the ratio never divides
/// by zero. The exact center maps to 0.
pub fn radian_from_point(x: f64, y: f64, cx: f64, cy: f64) -> f64 {
    if y == cy {
        // Horizontal ray: limiting angle, 3 or 9 o'clock.
        return if x > cx {
            FRAC_PI_2
        } else if x < cx {
            3.0 * FRAC_PI_2
        } else {
            0.0
        };
    }
    let mut alpha = ((x - cx) / (cy - y)).atan();
    if y > cy && x != cx {
        // Lower half: raw value is offset by half a turn.
        alpha += PI;
    } else if x < cx && y < cy {
        // Upper-left: raw value is negative, just under a full turn.
        alpha += TAU;
    }
    alpha
}

/// Convert a dial angle to whole seconds, rounded to the nearest second.
///
/// Floored at zero; angles past a full revolution keep converting linearly,
/// so a dial dragged through several turns reads as more than an hour.
pub fn time_from_radian(radian: f64) -> u64 {
    (radian * FULL_TURN_SECONDS as f64 / TAU).round().max(0.0) as u64
}

/// Convert whole seconds to a dial angle.
pub fn radian_from_time(seconds: u64) -> f64 {
    seconds as f64 * TAU / FULL_TURN_SECONDS as f64
}
