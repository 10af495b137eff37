//! Input focus modes of the gallery.
//!
//! Key presses mean different things depending on where focus sits. While the
//! viewer is open it owns the keyboard; otherwise a focused search input
//! interprets `Enter` and `Escape`, and everything else is left to the host.
//!
//! # Example
//!
//! ```rust
//! use vitrine::app::modes::{InputFocus, SearchScope};
//!
//! let focus = InputFocus::Search(SearchScope::Grid);
//! assert!(focus.is_searching());
//! ```

/// Which search input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// The grid's search box: filters the grid.
    Grid,

    /// The site-wide search box: promotes and dims within carousels.
    Site,
}

/// Where keyboard input is currently directed, viewer aside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFocus {
    /// Browsing thumbnails and carousels.
    #[default]
    Browse,

    /// Typing into one of the search inputs.
    Search(SearchScope),
}

impl InputFocus {
    #[must_use]
    pub const fn is_searching(self) -> bool {
        matches!(self, Self::Search(_))
    }
}
