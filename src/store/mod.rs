//! Item store holding the normalized gallery collection.
//!
//! The store is populated once at startup, or replaced wholesale on a full data
//! reload. Items are shared as `Rc<Item>` so filtered views and widgets can hold
//! references without copying; items never change after normalization.
//!
//! Retrieval is not the store's concern: [`crate::source`] providers fetch raw
//! records and the store only normalizes what they return.

pub mod normalizer;

pub use normalizer::{normalize, slugify, DEFAULT_COLLECTION};

use crate::domain::{Item, RawRecord};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Normalized items in source order.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Rc<Item>>,
}

impl ItemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the store contents with the normalization of `records`.
    ///
    /// Returns the freshly loaded items. The length always equals
    /// `records.len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitrine::{store::ItemStore, RawRecord};
    ///
    /// let mut store = ItemStore::new();
    /// let items = store.load(&[RawRecord { title: Some("Dusk".into()), ..Default::default() }]);
    /// assert_eq!(items[0].id, "dusk");
    /// ```
    pub fn load(&mut self, records: &[RawRecord]) -> &[Rc<Item>] {
        self.items = normalize(records).into_iter().map(Rc::new).collect();
        tracing::debug!(items = self.items.len(), "item store loaded");
        &self.items
    }

    /// All items in store order.
    #[must_use]
    pub fn items(&self) -> &[Rc<Item>] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rc<Item>> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Distinct lower-cased collection tags in first-appearance order.
    ///
    /// Tags differing only in case count as one, matching how categories
    /// compare.
    #[must_use]
    pub fn collections(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.items
            .iter()
            .map(|item| item.collection.to_lowercase())
            .filter(|tag| seen.insert(tag.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, collection: &str) -> RawRecord {
        RawRecord {
            title: Some(title.into()),
            collection: Some(collection.into()),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_load_replaces_wholesale() {
        let mut store = ItemStore::new();
        store.load(&[raw("One", "x"), raw("Two", "y")]);
        assert_eq!(store.len(), 2);

        store.load(&[raw("Three", "x")]);
        assert_eq!(store.len(), 1);
        assert!(store.contains("three"));
        assert!(!store.contains("one"));
    }

    #[test]
    fn test_collections_in_first_appearance_order() {
        let mut store = ItemStore::new();
        store.load(&[raw("a", "murals"), raw("b", "sketches"), raw("c", "murals")]);
        assert_eq!(store.collections(), vec!["murals", "sketches"]);
    }

    #[test]
    fn test_collections_ignore_case() {
        let mut store = ItemStore::new();
        store.load(&[raw("a", "Murals"), raw("b", "murals"), raw("c", "MURALS")]);
        assert_eq!(store.collections(), vec!["murals"]);
    }
}
