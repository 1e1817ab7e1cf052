//! L4 Atomic Layer: Time calculation utilities
//!
//! Every function takes `now` explicitly; the rail never reads the clock
//! itself, the host hands it the frame timestamp.

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) at `now`
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Milliseconds from `since` to `now`, zero if `now` is earlier
#[inline]
pub fn elapsed_ms(since: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(since).as_secs_f64() * 1000.0
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
