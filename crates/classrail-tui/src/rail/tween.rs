//! L3 Molecular Layer: Timed position animation
//!
//! Used for both arrow-key steps and the snap settle.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{lerp, progress};

/// Why a tween is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenKind {
    /// Smooth programmatic step from the keyboard
    KeyStep,
    /// Snap to the nearest item boundary
    Settle,
}

#[derive(Debug, Clone)]
pub struct Tween {
    kind: TweenKind,
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

impl Tween {
    pub fn new(
        kind: TweenKind,
        start: Instant,
        from: f64,
        to: f64,
        duration: Duration,
        easing: EasingType,
    ) -> Self {
        Self {
            kind,
            start,
            from,
            to,
            duration,
            easing,
        }
    }

    #[inline]
    pub fn kind(&self) -> TweenKind {
        self.kind
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Interpolated position at `now`
    pub fn sample(&self, now: Instant) -> f64 {
        let t = self.easing.apply(progress(self.start, now, self.duration));
        lerp(self.from, self.to, t)
    }

    #[inline]
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_settle_curve() {
        let t0 = Instant::now();
        let tween = Tween::new(
            TweenKind::Settle,
            t0,
            100.0,
            256.0,
            Duration::from_millis(360),
            EasingType::Cubic,
        );
        assert_eq!(tween.sample(t0), 100.0);
        // p = 0.5 -> 0.875 of the distance
        let mid = tween.sample(t0 + Duration::from_millis(180));
        assert!((mid - (100.0 + 156.0 * 0.875)).abs() < 1e-6);
        assert!(!tween.is_complete(t0 + Duration::from_millis(359)));
        assert!(tween.is_complete(t0 + Duration::from_millis(360)));
        assert_eq!(tween.sample(t0 + Duration::from_secs(2)), 256.0);
    }
}
