//! Category and text-query filtering.
//!
//! [`apply`] is a pure function of its inputs: identical arguments always yield
//! an identical [`FilteredView`]. Callers are expected to debounce text input
//! (≥100ms recommended) and call it only with settled query values.
//!
//! # Matching Rules
//!
//! 1. **Category**: `"all"` passes everything, otherwise an exact,
//!    case-insensitive match on the item's collection tag
//! 2. **Query**: trimmed, lower-cased and split on whitespace; every term must
//!    occur as a substring of `title + description` (AND semantics)
//! 3. **Order**: store order is preserved

pub mod promote;

pub use promote::{promote_matches, Promotion, SearchStats};

use crate::domain::Item;
use std::fmt;
use std::rc::Rc;

/// Category value meaning "no collection restriction".
pub const ALL_CATEGORIES: &str = "all";

/// An opaque, case-normalized collection tag or `all`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase();
        if normalized.is_empty() {
            Self::all()
        } else {
            Self(normalized)
        }
    }

    #[must_use]
    pub fn all() -> Self {
        Self(ALL_CATEGORIES.to_string())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0 == ALL_CATEGORIES
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn admits(&self, item: &Item) -> bool {
        self.is_all() || item.collection.to_lowercase() == self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    terms: Vec<String>,
}

impl Query {
    /// Parses user input into lower-cased terms.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrine::filter::Query;
    ///
    /// let query = Query::parse("  Sun   SET ");
    /// assert_eq!(query.terms(), ["sun", "set"]);
    /// assert!(Query::parse("   ").is_empty());
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let raw = input.trim().to_lowercase();
        let terms = raw.split_whitespace().map(String::from).collect();
        Self { raw, terms }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Normalized query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether every term occurs in the item's title or description.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.is_empty() || self.matches_text(&item.search_text())
    }

    /// Whether every term occurs in a lower-cased `haystack`.
    #[must_use]
    pub fn matches_text(&self, haystack: &str) -> bool {
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

/// The ordered subsequence of items matching the active category and query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    items: Vec<Rc<Item>>,
}

impl FilteredView {
    #[must_use]
    pub fn new(items: Vec<Rc<Item>>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rc<Item>> {
        self.items.get(index)
    }

    /// Position of the item with `id`, if it is part of the view.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    #[must_use]
    pub fn items(&self) -> &[Rc<Item>] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Item>> {
        self.items.iter()
    }

    /// Identifiers in view order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}

/// Computes the filtered view of `items`.
#[must_use]
pub fn apply(items: &[Rc<Item>], category: &Category, query: &Query) -> FilteredView {
    let _span = tracing::debug_span!("filter_apply",
        total_items = items.len(),
        category = %category,
        terms = query.terms().len()
    ).entered();

    let filtered: Vec<Rc<Item>> = items
        .iter()
        .filter(|item| category.admits(item) && query.matches(item))
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "filter applied");
    FilteredView::new(filtered)
}
