//! Background tasks
//!
//! The tick source that drives a running countdown. Spawned by
//! `DialTimer::start`, cancelled on pause or when the countdown reaches
//! zero.

pub mod countdown;

pub use countdown::countdown_tick_task;
