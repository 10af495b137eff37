//! Geometric proximity observer for a fixed-row grid.

use super::{ProximityObserver, ThumbId};
use std::collections::BTreeMap;

/// Distance beyond the visible area, in pixels, at which thumbnails start loading.
pub const DEFAULT_MARGIN: f64 = 300.0;

/// Vertical window of the scrolling container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }
}

/// Computes proximity from grid slots, assuming `columns` thumbnails per row of
/// `row_height` pixels.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    columns: usize,
    row_height: f64,
    margin: f64,
    observed: BTreeMap<ThumbId, usize>,
}

impl ViewportObserver {
    #[must_use]
    pub fn new(columns: usize, row_height: f64, margin: f64) -> Self {
        Self {
            columns: columns.max(1),
            row_height: row_height.max(0.0),
            margin: margin.max(0.0),
            observed: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Whether a thumbnail at `slot` intersects `viewport` expanded by the margin.
    #[must_use]
    pub fn is_near(&self, slot: usize, viewport: Viewport) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let top = (slot / self.columns) as f64 * self.row_height;
        let bottom = top + self.row_height;
        let window_top = viewport.scroll_top - self.margin;
        let window_bottom = viewport.scroll_top + viewport.height + self.margin;
        bottom >= window_top && top <= window_bottom
    }

    fn near_thumbs(&self, viewport: Viewport) -> Vec<ThumbId> {
        self.observed
            .iter()
            .filter(|&(_, &slot)| self.is_near(slot, viewport))
            .map(|(&thumb, _)| thumb)
            .collect()
    }
}

impl ProximityObserver for ViewportObserver {
    fn observe(&mut self, thumb: ThumbId, slot: usize) {
        self.observed.insert(thumb, slot);
    }

    fn unobserve(&mut self, thumb: ThumbId) {
        self.observed.remove(&thumb);
    }

    fn clear(&mut self) {
        self.observed.clear();
    }

    fn viewport_changed(&mut self, viewport: Viewport) -> Vec<ThumbId> {
        self.near_thumbs(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_extends_visible_window() {
        let observer = ViewportObserver::new(4, 100.0, DEFAULT_MARGIN);
        let viewport = Viewport::new(0.0, 500.0);
        // Row 7 starts at 700px, inside 500 + 300.
        assert!(observer.is_near(28, viewport));
        // Row 9 starts at 900px.
        assert!(!observer.is_near(36, viewport));
    }

    #[test]
    fn test_rows_above_scroll_position() {
        let observer = ViewportObserver::new(2, 100.0, 0.0);
        let viewport = Viewport::new(1000.0, 300.0);
        assert!(!observer.is_near(0, viewport));
        assert!(observer.is_near(20, viewport));
    }

    #[test]
    fn test_reports_only_observed_thumbs() {
        let mut observer = ViewportObserver::new(3, 100.0, 0.0);
        observer.observe(ThumbId(1), 0);
        observer.observe(ThumbId(2), 30);
        assert_eq!(observer.viewport_changed(Viewport::new(0.0, 200.0)), vec![ThumbId(1)]);

        observer.unobserve(ThumbId(1));
        assert!(observer.viewport_changed(Viewport::new(0.0, 200.0)).is_empty());
        assert_eq!(observer.observed_count(), 1);
    }
}
