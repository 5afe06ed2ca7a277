//! Dial geometry and handle hit-testing
//!
//! Layout and measurement belong to the host; the core only needs enough
//! geometry to know where the draggable handle sits and whether a pointer
//! landed on it.

/// Default radius of the circular handle, matching the widget's stock look.
pub const DEFAULT_HANDLE_RADIUS: f64 = 15.0;

/// Placement of the dial within its host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    /// Center of the dial.
    pub cx: f64,
    pub cy: f64,
    /// Radius of the rim the handle travels on.
    pub radius: f64,
    /// Hit radius of the draggable handle.
    pub handle_radius: f64,
}

impl DialGeometry {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            cx,
            cy,
            radius,
            handle_radius: DEFAULT_HANDLE_RADIUS,
        }
    }

    /// Geometry for a square widget of the given edge length, with the rim
    /// pulled in so the handle stays inside the bounds.
    pub fn centered(size: f64) -> Self {
        let half = size / 2.0;
        Self::new(half, half, half - DEFAULT_HANDLE_RADIUS)
    }

    pub fn with_handle_radius(mut self, handle_radius: f64) -> Self {
        self.handle_radius = handle_radius;
        self
    }

    /// Position of the handle center for a given dial angle (clockwise from
    /// the top).
    pub fn handle_center(&self, radian: f64) -> (f64, f64) {
        (
            self.cx + self.radius * radian.sin(),
            self.cy - self.radius * radian.cos(),
        )
    }

    /// Whether a pointer position lands on the handle.
    pub fn in_handle(&self, x: f64, y: f64, radian: f64) -> bool {
        let (hx, hy) = self.handle_center(radian);
        (x - hx).hypot(y - hy) <= self.handle_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn handle_starts_at_the_top() {
        let geo = DialGeometry::centered(300.0);
        let (hx, hy) = geo.handle_center(0.0);
        assert!((hx - 150.0).abs() < 1e-12);
        assert!((hy - 15.0).abs() < 1e-12);
    }

    #[test]
    fn handle_follows_the_angle() {
        let geo = DialGeometry::centered(300.0);
        let (hx, hy) = geo.handle_center(PI);
        assert!((hx - 150.0).abs() < 1e-9);
        assert!((hy - 285.0).abs() < 1e-9);
    }

    #[test]
    fn hit_test_accepts_points_on_the_handle() {
        let geo = DialGeometry::centered(300.0);
        let (hx, hy) = geo.handle_center(0.0);
        assert!(geo.in_handle(hx, hy, 0.0));
        assert!(geo.in_handle(hx + 14.0, hy, 0.0));
    }

    #[test]
    fn hit_test_rejects_points_off_the_handle() {
        let geo = DialGeometry::centered(300.0);
        assert!(!geo.in_handle(geo.cx, geo.cy, 0.0));
        let (hx, hy) = geo.handle_center(0.0);
        assert!(!geo.in_handle(hx + 16.0, hy, 0.0));
    }
}
