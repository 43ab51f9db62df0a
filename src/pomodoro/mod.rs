//! Pomodoro timer
//!
//! Optional focus timer shown in its own panel. The character reacts to its
//! events with dialog lines and expressions.

pub mod timer;

pub use timer::{
    PomodoroEvent, PomodoroEvents, PomodoroState, PomodoroTimer, Session, SnoozeTarget,
};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session lengths in minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    /// Work session length
    pub work_minutes: u64,
    /// Short break length
    pub short_break_minutes: u64,
    /// Long break length
    pub long_break_minutes: u64,
    /// How long a snooze postpones a confirmation
    pub snooze_minutes: u64,
    /// Work sessions per long break
    pub long_break_every: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            snooze_minutes: 5,
            long_break_every: 4,
        }
    }
}

impl PomodoroConfig {
    /// Work session length
    pub const fn work_duration(&self) -> Duration {
        Duration::from_secs(self.work_minutes.saturating_mul(60))
    }

    /// Short break length
    pub const fn short_break_duration(&self) -> Duration {
        Duration::from_secs(self.short_break_minutes.saturating_mul(60))
    }

    /// Long break length
    pub const fn long_break_duration(&self) -> Duration {
        Duration::from_secs(self.long_break_minutes.saturating_mul(60))
    }

    /// Snooze length
    pub const fn snooze_duration(&self) -> Duration {
        Duration::from_secs(self.snooze_minutes.saturating_mul(60))
    }

    /// Work sessions per long break, at least one
    pub fn cycles_per_long_break(&self) -> u32 {
        self.long_break_every.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cycles_per_long_break_is_clamped() {
        let config = PomodoroConfig {
            long_break_every: 0,
            ..PomodoroConfig::default()
        };
        assert_eq!(config.cycles_per_long_break(), 1);
    }

    #[test]
    fn test_huge_minutes_saturate() {
        let config = PomodoroConfig {
            work_minutes: u64::MAX,
            short_break_minutes: u64::MAX / 2,
            long_break_minutes: u64::MAX / 60 + 1,
            snooze_minutes: u64::MAX,
            ..PomodoroConfig::default()
        };
        assert_eq!(config.work_duration(), Duration::from_secs(u64::MAX));
        assert_eq!(config.short_break_duration(), Duration::from_secs(u64::MAX));
        assert_eq!(config.long_break_duration(), Duration::from_secs(u64::MAX));
        assert_eq!(config.snooze_duration(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_partial_json() {
        let config: PomodoroConfig = serde_json::from_str(r#"{ "work_minutes": 50 }"#).unwrap();
        assert_eq!(config.work_duration(), Duration::from_secs(3000));
        assert_eq!(config.long_break_every, 4);
    }
}
