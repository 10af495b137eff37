//! External data providers feeding the item store.
//!
//! Providers are the gallery's only contact with raw data: an authoritative
//! JSON document, or a scan of existing markup as a fallback. Both produce
//! [`RawRecord`]s; normalization happens later in [`crate::store`].
//!
//! # Fallback chain
//!
//! ```text
//! JsonDocumentProvider ──fail──▶ MarkupScanProvider ──fail──▶ empty list
//! ```
//!
//! A failing provider is a *data-unavailable* condition: it is logged at info
//! level and never surfaced to the user.

pub mod json;
pub mod markup;

pub use json::JsonDocumentProvider;
pub use markup::MarkupScanProvider;

use crate::domain::{RawRecord, Result};

/// A source of raw gallery records.
pub trait DataProvider {
    /// Short name used in log records.
    fn name(&self) -> &str;

    /// Produces raw records.
    ///
    /// # Errors
    ///
    /// Returns an error when the source is missing, unreadable or malformed.
    fn fetch(&self) -> Result<Vec<RawRecord>>;
}

/// Tries each provider in order and returns the first successful result.
///
/// A provider that succeeds with zero records still wins. When every provider
/// fails the gallery starts empty.
pub fn load_with_fallback(providers: &[&dyn DataProvider]) -> Vec<RawRecord> {
    let _span = tracing::debug_span!("load_with_fallback", providers = providers.len()).entered();

    for provider in providers {
        match provider.fetch() {
            Ok(records) => {
                tracing::debug!(provider = provider.name(), records = records.len(), "data source loaded");
                return records;
            }
            Err(e) => {
                tracing::info!(provider = provider.name(), error = %e, "data source unavailable, falling back");
            }
        }
    }

    tracing::info!("no data source yielded records, starting with an empty gallery");
    Vec::new()
}

/// Ticket identifying one data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Last-load-wins bookkeeping for asynchronous data loads.
///
/// Loads are not cancelable once started. A completed load is applied only if
/// no newer load has already been applied.
#[derive(Debug, Default)]
pub struct LoadTracker {
    issued: u64,
    applied: Option<LoadTicket>,
}

impl LoadTracker {
    /// Issues a ticket for a load that is about to start.
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Records completion of `ticket`; returns whether its result should be applied.
    pub fn complete(&mut self, ticket: LoadTicket) -> bool {
        if self.applied.is_some_and(|applied| applied > ticket) {
            tracing::debug!(ticket = ticket.0, "discarding stale data load");
            return false;
        }
        self.applied = Some(ticket);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GalleryError;

    struct Fixed(Option<Vec<RawRecord>>);

    impl DataProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self) -> Result<Vec<RawRecord>> {
            self.0
                .clone()
                .ok_or_else(|| GalleryError::DataUnavailable("not found".into()))
        }
    }

    fn one() -> Vec<RawRecord> {
        vec![RawRecord { title: Some("t".into()), ..RawRecord::default() }]
    }

    #[test]
    fn test_primary_wins() {
        let primary = Fixed(Some(one()));
        let fallback = Fixed(Some(vec![]));
        assert_eq!(load_with_fallback(&[&primary, &fallback]).len(), 1);
    }

    #[test]
    fn test_fallback_used_on_failure() {
        let primary = Fixed(None);
        let fallback = Fixed(Some(one()));
        assert_eq!(load_with_fallback(&[&primary, &fallback]).len(), 1);
    }

    #[test]
    fn test_all_failing_yields_empty() {
        let primary = Fixed(None);
        let fallback = Fixed(None);
        assert!(load_with_fallback(&[&primary, &fallback]).is_empty());
    }

    #[test]
    fn test_last_load_wins() {
        let mut tracker = LoadTracker::default();
        let older = tracker.begin();
        let newer = tracker.begin();
        assert!(tracker.complete(newer));
        assert!(!tracker.complete(older));
    }
}
