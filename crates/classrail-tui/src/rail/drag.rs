//! L3 Molecular Layer: Pointer drag session
//!
//! Exists only between pointer-down and pointer-up/cancel. Positions are
//! derived from the cumulative pointer delta; release velocity from the most
//! recent sample pair only, so a flick at the end of a slow drag still throws.

use std::time::Instant;

use super::timing::elapsed_ms;

/// Assumed frame gap when two samples share a timestamp
const SAME_FRAME_MS: f64 = 16.0;

/// Pointer sample in rail units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: u64,
    pub x: f64,
    pub y: f64,
}

impl PointerInput {
    pub fn new(pointer_id: u64, x: f64, y: f64) -> Self {
        Self { pointer_id, x, y }
    }
}

#[derive(Debug, Clone)]
pub struct DragSession {
    /// Captured pointer; moves from other pointers are ignored
    pointer_id: u64,
    start_x: f64,
    start_scroll: f64,
    last_x: f64,
    last_at: Instant,
}

impl DragSession {
    pub fn open(pointer: &PointerInput, scroll: f64, now: Instant) -> Self {
        Self {
            pointer_id: pointer.pointer_id,
            start_x: pointer.x,
            start_scroll: scroll,
            last_x: pointer.x,
            last_at: now,
        }
    }

    #[inline]
    pub fn owns(&self, pointer_id: u64) -> bool {
        self.pointer_id == pointer_id
    }

    /// Unclamped scroll position for a pointer at `x`
    pub fn position_for(&self, x: f64, drag_gain: f64) -> f64 {
        self.start_scroll - (x - self.start_x) * drag_gain
    }

    /// Record a sample and return the windowed release velocity
    ///
    /// Dragging the pointer right moves content right, so scroll position
    /// falls and the velocity is negative.
    pub fn sample(&mut self, x: f64, now: Instant, velocity_scale: f64) -> f64 {
        let dt = match elapsed_ms(self.last_at, now) {
            ms if ms > 0.0 => ms,
            _ => SAME_FRAME_MS,
        };
        let velocity = (self.last_x - x) / dt * velocity_scale;
        self.last_x = x;
        self.last_at = now;
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_position_follows_pointer() {
        let t0 = Instant::now();
        let drag = DragSession::open(&PointerInput::new(1, 400.0, 10.0), 300.0, t0);
        assert_eq!(drag.position_for(350.0, 1.0), 350.0);
        assert_eq!(drag.position_for(500.0, 1.0), 200.0);
        assert_eq!(drag.position_for(500.0, 2.0), 100.0);
    }

    #[test]
    fn test_release_velocity_for_rightward_flick() {
        let t0 = Instant::now();
        let start_x = 200.0;
        let end_x = 300.0;
        let mut drag = DragSession::open(&PointerInput::new(1, start_x, 0.0), 0.0, t0);
        let v = drag.sample(end_x, t0 + Duration::from_millis(50), 12.0);
        assert!((v - (start_x - end_x) / 50.0 * 12.0).abs() < 1e-9);
        assert!((v + 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_uses_latest_pair_only() {
        let t0 = Instant::now();
        let mut drag = DragSession::open(&PointerInput::new(1, 0.0, 0.0), 500.0, t0);
        // Slow drag left over a second
        drag.sample(-100.0, t0 + Duration::from_millis(1000), 12.0);
        // Then a quick flick
        let v = drag.sample(-140.0, t0 + Duration::from_millis(1010), 12.0);
        assert!((v - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_timestamp_assumes_one_frame() {
        let t0 = Instant::now();
        let mut drag = DragSession::open(&PointerInput::new(7, 100.0, 0.0), 0.0, t0);
        let v = drag.sample(84.0, t0, 12.0);
        assert!((v - 12.0).abs() < 1e-9);
        assert!(drag.owns(7));
        assert!(!drag.owns(1));
    }
}
