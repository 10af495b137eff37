//! Vitrine: state-synchronisation core for a browsable media gallery.
//!
//! Vitrine keeps every view of a gallery consistent:
//! - Normalized, deterministically identified items from heterogeneous records
//! - Category and multi-term search filtering with incremental pagination
//! - A modal viewer with wraparound navigation, focus trapping and deep links
//! - Carousels that follow the viewer and reorder on site-wide search
//! - Proximity-driven lazy loading of thumbnails

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Host (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Gallery state
//! │  - Event handling                                   │  ← Coordination
//! │  - Action emission                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!      │             │              │              │
//! ┌──────────┐ ┌───────────┐ ┌────────────┐ ┌────────────┐
//! │ viewer/  │ │ carousel/ │ │ lazy/      │ │ ui/        │
//! │ - Modal  │ │ - Deck    │ │ - Scheduler│ │ - Render   │
//! │ - Links  │ │ - Widgets │ │ - Viewport │ │ - Themes   │
//! │ - Focus  │ │           │ │            │ │            │
//! └──────────┘ └───────────┘ └────────────┘ └────────────┘
//!      │             │
//! ┌─────────────────────────────────────────────────────┐
//! │  bus/: single-threaded publish/subscribe            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Data Layers                                        │
//! │  - Providers (source/)                              │
//! │  - Item store + normalizer (store/)                 │
//! │  - Filtering + promotion (filter/), paging (pager/) │
//! │  - Item model, errors (domain/)                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing into a session span log    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Gallery state with the event/action model
//! - [`bus`]: Event bus carrying position-sync and reorder messages
//! - [`carousel`]: Carousel groups, shared tracks and widgets
//! - [`domain`]: Core domain types (Item, records, errors)
//! - [`filter`]: Category/query filtering and match promotion
//! - [`lazy`]: Deferred thumbnail loading
//! - [`observability`]: OpenTelemetry tracing
//! - [`pager`]: Incremental reveal of the filtered view
//! - [`source`]: Data providers and load tracking
//! - [`store`]: Item store and record normalization
//! - [`ui`]: Terminal rendering with theme support
//! - [`viewer`]: Viewer state machine, deep links, focus and keys
//!
//! # Configuration
//!
//! The terminal host takes `key=value` arguments:
//!
//! ```text
//! vitrine data=gallery.json markup=index.html columns=4 theme=gallery-light trace_level=debug
//! ```
//!
//! or the same keys from a TOML file with `config=<path>`.
//!
//! # Examples
//!
//! ```rust
//! use vitrine::{handle_event, initialize, Config, Event, RawRecord};
//!
//! let mut gallery = initialize(&Config::default());
//!
//! let records = vec![RawRecord {
//!     title: Some("Sunset Over Hills".to_string()),
//!     collection: Some("landscape".to_string()),
//!     ..RawRecord::default()
//! }];
//! let ticket = gallery.begin_load();
//! handle_event(&mut gallery, &Event::DataLoaded { ticket, records })?;
//!
//! let (changed, actions) = handle_event(
//!     &mut gallery,
//!     &Event::OpenItem { id: "sunset-over-hills".to_string(), focused: None },
//! )?;
//! assert!(changed);
//! assert!(!actions.is_empty());
//! assert!(gallery.viewer.is_open());
//! # Ok::<(), vitrine::GalleryError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Single-Threaded Sharing
//!
//! Everything runs on one event loop. Shared state uses `Rc`/`RefCell`:
//! - The carousel deck is the only writer of each shared track
//! - Widgets subscribe through weak handles, so dropping one unsubscribes it
//!   in effect
//!
//! ## Actions, Not Effects
//!
//! The core never touches a display. Operations return [`Action`]s that a
//! host executes, which keeps every flow testable without a DOM.

pub mod app;
pub mod bus;
pub mod carousel;
pub mod domain;
pub mod filter;
pub mod lazy;
pub mod observability;
pub mod pager;
pub mod source;
pub mod store;
pub mod ui;
pub mod viewer;

pub use app::{handle_event, Action, Event, Gallery};
pub use domain::{GalleryError, Item, RawRecord, Result};
pub use ui::Theme;

use bus::EventBus;
use lazy::{LazyLoadScheduler, ViewportObserver, DEFAULT_MARGIN};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

const DEFAULT_DATA_PATH: &str = "gallery.json";
const DEFAULT_COLUMNS: usize = 4;
const DEFAULT_ROW_HEIGHT: f64 = 240.0;

/// Gallery configuration.
///
/// # Example
///
/// ```toml
/// data_path = "gallery.json"
/// markup_path = "index.html"
/// grid_columns = 4
/// theme_name = "gallery-light"
/// trace_level = "debug"
/// trace_file = "vitrine-spans.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON document listing gallery records. Default: `gallery.json`
    pub data_path: String,

    /// HTML page scanned for records when the JSON document is unavailable.
    pub markup_path: Option<String>,

    /// Distance in rows' pixels within which a thumbnail counts as near the
    /// viewport. Default: 300
    pub lazy_margin: f64,

    /// Thumbnails per grid row. Default: 4
    pub grid_columns: usize,

    /// Height of one grid row. Default: 240
    pub row_height: f64,

    /// Built-in theme name to use.
    ///
    /// Options: `gallery-dark`, `gallery-light`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Any `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// File the host appends the session span log to on exit.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            markup_path: None,
            lazy_margin: DEFAULT_MARGIN,
            grid_columns: DEFAULT_COLUMNS,
            row_height: DEFAULT_ROW_HEIGHT,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from `key=value` pairs.
    ///
    /// # Parsing Rules
    ///
    /// - `data`, `markup`, `theme`, `theme_file`, `trace_level`, `trace_file`:
    ///   taken as-is
    /// - `lazy_margin`, `row_height`: `f64`, non-negative
    /// - `columns`: `usize`, at least 1
    ///
    /// Missing or unparsable values fall back to their defaults individually.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use vitrine::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data".to_string(), "art.json".to_string());
    /// map.insert("columns".to_string(), "six".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.data_path, "art.json");
    /// assert_eq!(config.grid_columns, 4);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let float = |key: &str, fallback: f64| {
            config
                .get(key)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(fallback)
        };

        Self {
            data_path: text("data").unwrap_or(defaults.data_path),
            markup_path: text("markup"),
            lazy_margin: float("lazy_margin", defaults.lazy_margin),
            grid_columns: config
                .get("columns")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|c| *c > 0)
                .unwrap_or(defaults.grid_columns),
            row_height: float("row_height", defaults.row_height),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
            trace_file: text("trace_file"),
        }
    }

    /// Reads configuration from a TOML file using the field names as keys.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Io`] if the file cannot be read, or
    /// [`GalleryError::Config`] if it is not valid TOML for this structure.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| GalleryError::Config(format!("{}: {e}", path.display())))?;

        if config.grid_columns == 0 {
            return Err(GalleryError::Config("grid_columns must be at least 1".to_string()));
        }
        Ok(config)
    }
}

/// Creates a gallery ready for its first load.
///
/// Selects the theme (file, then name, then default), builds the lazy-load
/// scheduler over a viewport observer sized from `config`, and wires a fresh
/// event bus.
///
/// # Example
///
/// ```rust
/// use vitrine::{initialize, Config};
///
/// let config = Config {
///     theme_name: Some("gallery-light".to_string()),
///     ..Default::default()
/// };
///
/// let gallery = initialize(&config);
/// assert_eq!(gallery.theme.name, "gallery-light");
/// assert!(gallery.lazy.is_deferred());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> Gallery {
    tracing::debug!("initializing gallery");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let observer = ViewportObserver::new(config.grid_columns, config.row_height, config.lazy_margin);
    let lazy = LazyLoadScheduler::new(Box::new(observer));

    Gallery::new(Rc::new(EventBus::new()), lazy, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_map_defaults() {
        let config = Config::from_map(&BTreeMap::new());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_map_parses_typed_values() {
        let map: BTreeMap<String, String> = [
            ("markup", "index.html"),
            ("columns", "6"),
            ("lazy_margin", "120.5"),
            ("row_height", "-3"),
            ("theme", "gallery-light"),
            ("trace_file", "  "),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.markup_path.as_deref(), Some("index.html"));
        assert_eq!(config.grid_columns, 6);
        assert!((config.lazy_margin - 120.5).abs() < f64::EPSILON);
        assert!((config.row_height - DEFAULT_ROW_HEIGHT).abs() < f64::EPSILON);
        assert_eq!(config.theme_name.as_deref(), Some("gallery-light"));
        assert_eq!(config.trace_file, None);
    }

    #[test]
    fn test_from_toml_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_path = \"art.json\"\ngrid_columns = 3").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.data_path, "art.json");
        assert_eq!(config.grid_columns, 3);
        assert!((config.lazy_margin - DEFAULT_MARGIN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_toml_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grid_columns = \"many\"").unwrap();
        assert!(matches!(
            Config::from_toml_file(file.path()),
            Err(GalleryError::Config(_))
        ));

        let mut zero = tempfile::NamedTempFile::new().unwrap();
        writeln!(zero, "grid_columns = 0").unwrap();
        assert!(matches!(
            Config::from_toml_file(zero.path()),
            Err(GalleryError::Config(_))
        ));
    }

    #[test]
    fn test_initialize_falls_back_on_unknown_theme() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}
