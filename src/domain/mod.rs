//! Domain layer for the gallery core.
//!
//! Holds the canonical media [`Item`], the heterogeneous [`RawRecord`] shape
//! that data providers hand to the store, and the crate-wide error type. Nothing
//! here knows about rendering, the event bus or the viewer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item and raw record models

pub mod error;
pub mod item;

pub use error::{GalleryError, Result};
pub use item::{Item, RawRecord};
