//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "dial-timer")]
#[command(about = "Run a dial countdown in the terminal")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Minutes to preset on the dial (one revolution is 60)
    #[arg(short, long, default_value = "10")]
    pub minutes: u64,

    /// Tick period in milliseconds
    #[arg(short, long, default_value = "1000")]
    pub tick_ms: u64,

    /// Hint label shown under the clock readout
    #[arg(long, default_value = "time setting")]
    pub hint: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Preset duration in seconds, capped at one revolution of the dial.
    pub fn preset_seconds(&self) -> i64 {
        (self.minutes * 60).min(3600) as i64
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(minutes: u64, tick_ms: u64) -> Config {
        Config {
            minutes,
            tick_ms,
            hint: String::new(),
            verbose: false,
        }
    }

    #[test]
    fn preset_is_capped_at_one_revolution() {
        assert_eq!(config(10, 1000).preset_seconds(), 600);
        assert_eq!(config(90, 1000).preset_seconds(), 3600);
    }

    #[test]
    fn tick_period_never_drops_to_zero() {
        assert_eq!(config(10, 0).tick_period(), Duration::from_millis(1));
        assert_eq!(config(10, 250).tick_period(), Duration::from_millis(250));
    }
}
