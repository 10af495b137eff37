//! Search-driven promotion of matches within a rendering group.
//!
//! Live search over carousels does not hide anything: matches move ahead of
//! non-matches inside their own group (each side keeping its relative order)
//! and non-matches are dimmed. Promotion never crosses group boundaries.
//!
//! Site search looks wider than the grid query: besides title and description
//! it matches the date and the image file name.

use super::Query;
use crate::domain::Item;
use std::fmt;
use std::rc::Rc;

/// Result of promoting matches within one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    /// Matches first, then non-matches, each in original relative order.
    pub order: Vec<Rc<Item>>,
    /// Number of leading entries of `order` that matched.
    pub matched: usize,
}

impl Promotion {
    /// Whether the entry at `position` in `order` is dimmed.
    #[must_use]
    pub const fn is_dimmed(&self, position: usize) -> bool {
        position >= self.matched
    }
}

/// Stable-partitions `sequence` into matches followed by non-matches.
///
/// An empty query matches everything and returns the sequence unchanged.
#[must_use]
pub fn promote_matches(sequence: &[Rc<Item>], query: &Query) -> Promotion {
    let (mut order, rest): (Vec<Rc<Item>>, Vec<Rc<Item>>) =
        sequence
            .iter()
            .cloned()
            .partition(|item| query.is_empty() || query.matches_text(&item.site_search_text()));
    let matched = order.len();
    order.extend(rest);
    Promotion { order, matched }
}

/// Result counter shown next to the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub matches: usize,
    pub active: bool,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.active, self.matches) {
            (false, _) => Ok(()),
            (true, 0) => f.write_str("No results"),
            (true, 1) => f.write_str("1 result"),
            (true, n) => write!(f, "{n} results"),
        }
    }
}
