//! L3 Molecular Layer: Snap settler
//!
//! Plans the ease from a resting position to the nearest item boundary.

use std::time::{Duration, Instant};

use tracing::debug;

use super::config::{RailConfig, RailConfigExt};
use super::easing::EasingType;
use super::geometry::{settle_target, RailMetrics};
use super::tween::{Tween, TweenKind};

/// Distances below this are already settled
pub const SETTLE_EPSILON: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct SnapSettler {
    duration: Duration,
    fallback_item_width: f64,
}

impl SnapSettler {
    pub fn new(config: &RailConfig) -> Self {
        Self {
            duration: config.settle_duration(),
            fallback_item_width: config.fallback_item_width,
        }
    }

    /// Build the settle animation, or `None` when already on a boundary
    ///
    /// The boundary is clamped to the reachable range so the last card of a
    /// rail whose end is not pitch-aligned does not ease toward a position
    /// that can never be shown.
    pub fn plan(&self, position: f64, metrics: &RailMetrics, now: Instant) -> Option<Tween> {
        let pitch = metrics.item_pitch(self.fallback_item_width);
        let target = metrics.clamp(settle_target(position, pitch));
        let distance = target - position;
        if distance.abs() < SETTLE_EPSILON {
            debug!(position, target, "Rail already settled");
            return None;
        }
        debug!(position, target, "Rail settling");
        Some(Tween::new(
            TweenKind::Settle,
            now,
            position,
            target,
            self.duration,
            EasingType::Cubic,
        ))
    }
}
