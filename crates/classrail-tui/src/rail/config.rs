//! L4 Atomic Layer: Configuration types for the rail
//!
//! Re-exports configuration from classrail-core and adds duration helpers.

use std::time::Duration;

pub use classrail_core::{AutoScrollConfig, EasingType, RailConfig};

/// Extension trait for RailConfig with utility methods
pub trait RailConfigExt {
    /// Quiet time after the last input before the rail may settle
    fn idle_after(&self) -> Duration;

    /// Length of the snap-to-item ease
    fn settle_duration(&self) -> Duration;

    /// Length of an arrow-key step
    fn key_step_duration(&self) -> Duration;
}

impl RailConfigExt for RailConfig {
    #[inline]
    fn idle_after(&self) -> Duration {
        Duration::from_millis(self.idle_after_ms)
    }

    #[inline]
    fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    #[inline]
    fn key_step_duration(&self) -> Duration {
        Duration::from_millis(self.key_step_ms)
    }
}

/// Extension trait for AutoScrollConfig
pub trait AutoScrollConfigExt {
    /// How long an interaction holds the drift off
    fn pause_duration(&self) -> Duration;
}

impl AutoScrollConfigExt for AutoScrollConfig {
    #[inline]
    fn pause_duration(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let rail = RailConfig::default();
        assert_eq!(rail.idle_after(), Duration::from_millis(140));
        assert_eq!(rail.settle_duration(), Duration::from_millis(360));
        assert_eq!(rail.key_step_duration(), Duration::from_millis(300));
        assert_eq!(
            AutoScrollConfig::default().pause_duration(),
            Duration::from_secs(4)
        );
    }
}
