//! L4 Atomic Layer: Raw input shapes for the rail adapters
//!
//! The controller consumes these; the host translates its own events
//! (terminal mouse/keys here) into them.

use super::config::RailConfig;
use super::geometry::Bounds;

/// Wheel gesture in rail units, with the pointer position it happened at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub x: f64,
    pub y: f64,
}

impl WheelInput {
    pub fn vertical(delta_y: f64, x: f64, y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            x,
            y,
        }
    }

    pub fn horizontal(delta_x: f64, x: f64, y: f64) -> Self {
        Self {
            delta_x,
            delta_y: 0.0,
            x,
            y,
        }
    }

    /// Horizontal only when it strictly dominates; ties count as vertical
    #[inline]
    pub fn is_horizontal_intent(&self) -> bool {
        self.delta_x.abs() > self.delta_y.abs()
    }

    /// Velocity impulse for a vertical gesture
    #[inline]
    pub fn impulse(&self, config: &RailConfig) -> f64 {
        self.delta_y * config.wheel_gain * config.wheel_damping
    }
}

/// What the controller did with a wheel gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Converted to rail velocity; the host must suppress its default scroll
    Intercepted,
    /// Left to the host's native horizontal scrolling
    PassThrough,
}

/// Keys the rail reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailKey {
    Left,
    Right,
    /// Any other key: pauses auto-scroll, nothing else
    Other,
}

impl RailKey {
    /// Step direction in item pitches
    #[inline]
    pub fn step(self) -> Option<f64> {
        match self {
            RailKey::Left => Some(-1.0),
            RailKey::Right => Some(1.0),
            RailKey::Other => None,
        }
    }
}

/// Capturing wheel listener on the rail's enclosing section
///
/// Gestures anywhere in the section reach the rail only when the pointer is
/// over the rail's bounding box, so a rail narrower than its section still
/// captures wheel input over its own area and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelRouter {
    pub section: Bounds,
    pub rail: Bounds,
}

impl WheelRouter {
    pub fn new(section: Bounds, rail: Bounds) -> Self {
        Self { section, rail }
    }

    /// The gesture to forward to the rail, if any
    pub fn route(&self, wheel: WheelInput) -> Option<WheelInput> {
        if self.section.contains(wheel.x, wheel.y) && self.rail.contains(wheel.x, wheel.y) {
            Some(wheel)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent() {
        assert!(WheelInput::horizontal(30.0, 0.0, 0.0).is_horizontal_intent());
        assert!(!WheelInput::vertical(-30.0, 0.0, 0.0).is_horizontal_intent());
        let tie = WheelInput {
            delta_x: 10.0,
            delta_y: -10.0,
            x: 0.0,
            y: 0.0,
        };
        assert!(!tie.is_horizontal_intent());
    }

    #[test]
    fn test_impulse_uses_gain_and_damping() {
        let config = RailConfig::default();
        let wheel = WheelInput::vertical(100.0, 0.0, 0.0);
        assert!((wheel.impulse(&config) - 13.8).abs() < 1e-9);
    }

    #[test]
    fn test_router_only_forwards_over_rail() {
        let router = WheelRouter::new(
            Bounds::new(0.0, 0.0, 1000.0, 600.0),
            Bounds::new(100.0, 200.0, 600.0, 200.0),
        );
        assert!(router.route(WheelInput::vertical(100.0, 150.0, 250.0)).is_some());
        assert!(router.route(WheelInput::vertical(100.0, 800.0, 250.0)).is_none());
        assert!(router.route(WheelInput::vertical(100.0, 150.0, 100.0)).is_none());
    }

    #[test]
    fn test_key_steps() {
        assert_eq!(RailKey::Left.step(), Some(-1.0));
        assert_eq!(RailKey::Right.step(), Some(1.0));
        assert_eq!(RailKey::Other.step(), None);
    }
}
