//! L4 Atomic Layer: Rail geometry
//!
//! Pure queries over the current layout. Nothing here is cached: the host
//! replaces [`RailMetrics`] whenever the cards or the viewport change and
//! every bound is derived from that snapshot on demand.

/// Layout snapshot of the rail, in rail units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailMetrics {
    /// Width of the first laid-out item, `None` while the rail is empty
    pub item_width: Option<f64>,
    /// Fixed gap between consecutive items
    pub gap: f64,
    /// Total scrollable content width
    pub content_extent: f64,
    /// Visible width of the rail
    pub viewport_extent: f64,
}

impl RailMetrics {
    /// Metrics for an empty rail with the given viewport
    pub fn empty(viewport_extent: f64) -> Self {
        Self {
            item_width: None,
            gap: 0.0,
            content_extent: viewport_extent,
            viewport_extent,
        }
    }

    /// Distance between consecutive item starts
    ///
    /// Falls back to `fallback_width` when no item exists yet.
    pub fn item_pitch(&self, fallback_width: f64) -> f64 {
        let width = self
            .item_width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(fallback_width);
        width + self.gap.max(0.0)
    }

    /// Largest reachable scroll position
    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Whether there is anything to scroll at all
    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.max_scroll() > 0.0
    }

    /// Clamp a position into `[0, max_scroll]`
    #[inline]
    pub fn clamp(&self, position: f64) -> f64 {
        if position.is_nan() {
            return 0.0;
        }
        position.min(self.max_scroll()).max(0.0)
    }
}

/// Nearest item boundary: `round(position / pitch) * pitch`
#[inline]
pub fn settle_target(position: f64, pitch: f64) -> f64 {
    if pitch <= 0.0 {
        return position;
    }
    (position / pitch).round() * pitch
}

/// Index of the item whose boundary is nearest to `position`
#[inline]
pub fn item_index_at(position: f64, pitch: f64) -> usize {
    if pitch <= 0.0 {
        return 0;
    }
    (position / pitch).round().max(0.0) as usize
}

/// Axis-aligned box used for pointer hit-testing (inclusive edges)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}
