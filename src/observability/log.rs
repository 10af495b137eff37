//! Bounded, shareable buffer of exported span records.

use crate::domain::Result;
use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Records kept before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 2048;

/// In-memory span log shared between the exporter and the host.
///
/// Cloning yields another handle onto the same buffer.
#[derive(Debug, Clone)]
pub struct SpanLog {
    records: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl SpanLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)))),
            capacity: capacity.max(1),
        }
    }

    // A panic while holding the lock leaves the buffer itself intact.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a record, evicting the oldest when full.
    pub fn push(&self, record: String) {
        let mut records = self.lock();
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the buffered records, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// Removes and returns every buffered record, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        self.lock().drain(..).collect()
    }

    /// Drains the log into `path`, one record per line, appending.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Io`](crate::GalleryError::Io) if the file cannot
    /// be opened or written; the drained records are lost in that case.
    pub fn write_to(&self, path: &Path) -> Result<usize> {
        let records = self.drain();
        if records.is_empty() {
            return Ok(0);
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for record in &records {
            writeln!(file, "{record}")?;
        }
        file.flush()?;
        Ok(records.len())
    }
}

impl Default for SpanLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let log = SpanLog::with_capacity(2);
        log.push("a".into());
        log.push("b".into());
        log.push("c".into());
        assert_eq!(log.snapshot(), vec!["b", "c"]);
    }

    #[test]
    fn test_clones_share_buffer() {
        let log = SpanLog::default();
        let handle = log.clone();
        handle.push("span".into());
        assert_eq!(log.len(), 1);
        assert_eq!(log.drain(), vec!["span"]);
        assert!(handle.is_empty());
    }

    #[test]
    fn test_write_to_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let log = SpanLog::default();

        log.push("{\"name\":\"a\"}".into());
        assert_eq!(log.write_to(&path).unwrap(), 1);
        log.push("{\"name\":\"b\"}".into());
        assert_eq!(log.write_to(&path).unwrap(), 1);
        assert_eq!(log.write_to(&path).unwrap(), 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(log.is_empty());
    }
}
