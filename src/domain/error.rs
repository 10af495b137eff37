//! Error types for the gallery core.
//!
//! This module defines the centralized error type [`GalleryError`] and a type alias
//! [`Result`] used throughout the crate. None of these errors is fatal to a gallery
//! session: providers, configuration and theme loading surface them so the caller
//! can degrade to a reduced experience.

use thiserror::Error;

/// The main error type for gallery operations.
///
/// # Examples
///
/// ```
/// use vitrine::GalleryError;
///
/// fn fetch_records() -> Result<(), GalleryError> {
///     Err(GalleryError::DataUnavailable("gallery.json returned 404".to_string()))
/// }
/// assert!(fetch_records().is_err());
/// ```
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while a data
    /// provider reads its source document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A data provider could not yield records.
    ///
    /// Recovered by falling through to the next provider in the chain.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An event bus subscriber failed while handling a message.
    ///
    /// Contained by the bus: delivery continues to the remaining subscribers.
    #[error("Subscriber error: {0}")]
    Subscriber(String),
}

/// A specialized `Result` type for gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
