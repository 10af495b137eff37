//! JSON document provider.
//!
//! Reads a `gallery.json`-style document: either a top-level array of records
//! or an object wrapping the array under `items`.
//!
//! ```json
//! [
//!   { "id": "dusk", "thumb": "t/dusk.jpg", "full": "f/dusk.jpg",
//!     "title": "Dusk", "desc": "Evening light", "date": "2021-06-01",
//!     "collection": "landscapes" }
//! ]
//! ```

use crate::domain::{GalleryError, RawRecord, Result};
use crate::source::DataProvider;
use serde::Deserialize;
use std::path::PathBuf;

/// Accepted document layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<RawRecord>),
    Wrapped { items: Vec<RawRecord> },
}

/// Reads records from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonDocumentProvider {
    path: PathBuf,
}

impl JsonDocumentProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses records from an in-memory document.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Json`] if the text is not a record list.
    pub fn parse(text: &str) -> Result<Vec<RawRecord>> {
        let document: Document = serde_json::from_str(text)?;
        Ok(match document {
            Document::List(records) | Document::Wrapped { items: records } => records,
        })
    }
}

impl DataProvider for JsonDocumentProvider {
    fn name(&self) -> &str {
        "json-document"
    }

    fn fetch(&self) -> Result<Vec<RawRecord>> {
        let _span = tracing::debug_span!("json_fetch", path = %self.path.display()).entered();

        if !self.path.exists() {
            return Err(GalleryError::DataUnavailable(format!(
                "{} not found",
                self.path.display()
            )));
        }

        let text = std::fs::read_to_string(&self.path)?;
        Self::parse(&text)
    }
}
