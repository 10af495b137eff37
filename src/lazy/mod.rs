//! Deferred thumbnail source assignment.
//!
//! Thumbnails are rendered as placeholders. The scheduler assigns the real
//! image source once a placeholder comes within a proximity margin of the
//! viewport, then stops tracking it. Each thumbnail receives its source at
//! most once.
//!
//! Proximity detection is pluggable through [`ProximityObserver`]. When no
//! observer is available the scheduler degrades to assigning sources
//! immediately, so thumbnails always load.

pub mod viewport;

pub use viewport::{Viewport, ViewportObserver, DEFAULT_MARGIN};

use crate::app::Action;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Handle of one rendered thumbnail placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThumbId(pub u64);

impl fmt::Display for ThumbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thumb-{}", self.0)
    }
}

/// Reports which observed thumbnails are near the viewport.
pub trait ProximityObserver {
    /// Starts watching `thumb`, laid out at grid position `slot`.
    fn observe(&mut self, thumb: ThumbId, slot: usize);

    /// Stops watching `thumb`.
    fn unobserve(&mut self, thumb: ThumbId);

    /// Stops watching everything.
    fn clear(&mut self);

    /// Updates the viewport and returns the observed thumbnails now within the margin.
    fn viewport_changed(&mut self, viewport: Viewport) -> Vec<ThumbId>;
}

/// Assigns thumbnail sources on proximity.
pub struct LazyLoadScheduler {
    observer: Option<Box<dyn ProximityObserver>>,
    pending: HashMap<ThumbId, String>,
    loaded: HashSet<ThumbId>,
}

impl LazyLoadScheduler {
    #[must_use]
    pub fn new(observer: Box<dyn ProximityObserver>) -> Self {
        Self {
            observer: Some(observer),
            pending: HashMap::new(),
            loaded: HashSet::new(),
        }
    }

    /// Scheduler for hosts without proximity detection: every source is assigned on watch.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            observer: None,
            pending: HashMap::new(),
            loaded: HashSet::new(),
        }
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.observer.is_some()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_loaded(&self, thumb: ThumbId) -> bool {
        self.loaded.contains(&thumb)
    }

    /// Registers a freshly rendered placeholder.
    ///
    /// Returns the source assignment right away when there is no observer.
    pub fn watch(&mut self, thumb: ThumbId, slot: usize, url: &str) -> Option<Action> {
        if self.loaded.contains(&thumb) {
            return None;
        }
        match self.observer.as_mut() {
            Some(observer) => {
                self.pending.insert(thumb, url.to_string());
                observer.observe(thumb, slot);
                None
            }
            None => self.assign(thumb, url.to_string()),
        }
    }

    /// Handles a proximity report, assigning each near thumbnail its source once.
    pub fn on_proximity(&mut self, near: &[ThumbId]) -> Vec<Action> {
        let mut actions = Vec::new();
        for &thumb in near {
            let Some(url) = self.pending.remove(&thumb) else {
                continue;
            };
            if let Some(observer) = self.observer.as_mut() {
                observer.unobserve(thumb);
            }
            actions.extend(self.assign(thumb, url));
        }
        if !actions.is_empty() {
            tracing::debug!(assigned = actions.len(), pending = self.pending.len(), "thumb sources assigned");
        }
        actions
    }

    /// Forwards a viewport change to the observer and assigns whatever came near.
    pub fn viewport_changed(&mut self, viewport: Viewport) -> Vec<Action> {
        let near = match self.observer.as_mut() {
            Some(observer) => observer.viewport_changed(viewport),
            None => return Vec::new(),
        };
        self.on_proximity(&near)
    }

    /// Forgets every placeholder; used when the grid is cleared.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.loaded.clear();
        if let Some(observer) = self.observer.as_mut() {
            observer.clear();
        }
    }

    fn assign(&mut self, thumb: ThumbId, url: String) -> Option<Action> {
        self.loaded.insert(thumb).then_some(Action::AssignSource { thumb, url })
    }
}

impl fmt::Debug for LazyLoadScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyLoadScheduler")
            .field("deferred", &self.is_deferred())
            .field("pending", &self.pending.len())
            .field("loaded", &self.loaded.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> LazyLoadScheduler {
        LazyLoadScheduler::new(Box::new(ViewportObserver::new(4, 200.0, DEFAULT_MARGIN)))
    }

    #[test]
    fn test_without_observer_assigns_immediately() {
        let mut lazy = LazyLoadScheduler::immediate();
        let action = lazy.watch(ThumbId(1), 0, "t/a.jpg");
        assert_eq!(
            action,
            Some(Action::AssignSource { thumb: ThumbId(1), url: "t/a.jpg".into() })
        );
        assert_eq!(lazy.watch(ThumbId(1), 0, "t/a.jpg"), None);
    }

    #[test]
    fn test_deferred_until_near() {
        let mut lazy = scheduler();
        assert_eq!(lazy.watch(ThumbId(1), 0, "t/a.jpg"), None);
        assert_eq!(lazy.watch(ThumbId(2), 40, "t/b.jpg"), None);
        assert_eq!(lazy.pending_count(), 2);

        let actions = lazy.viewport_changed(Viewport::new(0.0, 600.0));
        assert_eq!(actions, vec![Action::AssignSource { thumb: ThumbId(1), url: "t/a.jpg".into() }]);
        assert!(lazy.is_loaded(ThumbId(1)));
        assert!(!lazy.is_loaded(ThumbId(2)));
    }

    #[test]
    fn test_source_assigned_at_most_once() {
        let mut lazy = scheduler();
        lazy.watch(ThumbId(7), 0, "t/x.jpg");
        let first = lazy.on_proximity(&[ThumbId(7)]);
        let again = lazy.on_proximity(&[ThumbId(7), ThumbId(7)]);
        assert_eq!(first.len(), 1);
        assert!(again.is_empty());
    }

    #[test]
    fn test_reset_forgets_pending() {
        let mut lazy = scheduler();
        lazy.watch(ThumbId(1), 0, "t/a.jpg");
        lazy.reset();
        assert_eq!(lazy.pending_count(), 0);
        assert!(lazy.viewport_changed(Viewport::new(0.0, 600.0)).is_empty());
    }
}
