//! Incremental pagination over the filtered view.
//!
//! The paginator reveals a [`FilteredView`] in fixed increments of
//! [`PAGE_SIZE`]. It holds only a counter; the view is passed in on every call
//! so a stale view can never be paginated. The rendering layer appends what
//! [`Paginator::reveal_next`] returns and clears itself on [`Paginator::reset`].

use crate::domain::Item;
use crate::filter::FilteredView;
use std::rc::Rc;

/// Number of items revealed per page.
pub const PAGE_SIZE: usize = 24;

/// Tracks how much of the current view has been revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    revealed: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_size: PAGE_SIZE,
            revealed: 0,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items revealed so far.
    #[must_use]
    pub const fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Forgets everything revealed; called whenever the view changes identity.
    pub fn reset(&mut self) {
        tracing::trace!(previously_revealed = self.revealed, "paginator reset");
        self.revealed = 0;
    }

    #[must_use]
    pub fn has_more(&self, view: &FilteredView) -> bool {
        self.revealed < view.len()
    }

    /// Returns the next page of `view`, or fewer items at the end.
    ///
    /// A no-op returning an empty page once everything is revealed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitrine::filter::FilteredView;
    /// use vitrine::pager::Paginator;
    ///
    /// let view = FilteredView::default();
    /// let mut pager = Paginator::new();
    /// assert!(pager.reveal_next(&view).is_empty());
    /// assert!(!pager.has_more(&view));
    /// ```
    pub fn reveal_next(&mut self, view: &FilteredView) -> Vec<Rc<Item>> {
        // A view that shrank underneath us is clamped before revealing.
        let start = self.revealed.min(view.len());
        let end = (start + self.page_size).min(view.len());
        self.revealed = end;

        tracing::debug!(start, end, total = view.len(), "page revealed");
        view.items()[start..end].to_vec()
    }

    /// Reveals pages until `index` is revealed, returning everything newly revealed.
    pub fn reveal_through(&mut self, view: &FilteredView, index: usize) -> Vec<Rc<Item>> {
        let mut revealed = Vec::new();
        while self.revealed <= index && self.has_more(view) {
            revealed.extend(self.reveal_next(view));
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(n: usize) -> FilteredView {
        FilteredView::new(
            (0..n)
                .map(|i| {
                    Rc::new(Item {
                        id: format!("art-{i:03}"),
                        thumb_url: String::new(),
                        full_url: String::new(),
                        title: String::new(),
                        description: String::new(),
                        date: String::new(),
                        collection: "all".into(),
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn test_pages_never_exceed_page_size() {
        let v = view(50);
        let mut pager = Paginator::new();
        assert_eq!(pager.reveal_next(&v).len(), 24);
        assert!(pager.has_more(&v));
        assert_eq!(pager.reveal_next(&v).len(), 24);
        assert_eq!(pager.reveal_next(&v).len(), 2);
        assert!(!pager.has_more(&v));
        assert_eq!(pager.revealed_count(), v.len());
        assert!(pager.reveal_next(&v).is_empty());
    }

    #[test]
    fn test_reset_starts_over() {
        let v = view(30);
        let mut pager = Paginator::new();
        let _ = pager.reveal_next(&v);
        pager.reset();
        assert_eq!(pager.revealed_count(), 0);
        assert_eq!(pager.reveal_next(&v)[0].id, "art-000");
    }

    #[test]
    fn test_reveal_through_index() {
        let v = view(80);
        let mut pager = Paginator::new();
        let revealed = pager.reveal_through(&v, 30);
        assert_eq!(revealed.len(), 48);
        assert_eq!(pager.revealed_count(), 48);
        assert!(pager.reveal_through(&v, 10).is_empty());
    }

    #[test]
    fn test_has_more_iff_not_fully_revealed() {
        let v = view(24);
        let mut pager = Paginator::new();
        assert!(pager.has_more(&v));
        let _ = pager.reveal_next(&v);
        assert!(!pager.has_more(&v));
    }
}
