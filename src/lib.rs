//! Dial Timer - a circular dial countdown widget core
//!
//! A dial maps one revolution to an hour: drag the handle around the rim to
//! set a duration, then count it down one second per tick. This library
//! owns the angle/time state machine only; pixel rendering, layout, and
//! input plumbing belong to the host, which reads [`RenderState`] on each
//! repaint and subscribes to [`DialEvent`] notifications.

pub mod angle;
pub mod config;
pub mod events;
pub mod geometry;
pub mod render;
pub mod state;
mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use events::DialEvent;
pub use geometry::DialGeometry;
pub use render::RenderState;
pub use state::{DialPhase, DialSnapshot, DialTimer};
pub use utils::signals::shutdown_signal;
