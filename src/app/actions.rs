//! Actions representing side effects for the rendering layer to perform.
//!
//! The core never touches a visual surface directly. State transitions return
//! a `Vec<Action>` and the host executes them in order: building thumbnail
//! elements, assigning image sources, moving focus, rewriting the URL fragment.
//!
//! # Example
//!
//! ```rust
//! use vitrine::app::Action;
//!
//! let actions = vec![Action::ReplaceFragment(None)];
//! assert!(matches!(actions[0], Action::ReplaceFragment(None)));
//! ```

use crate::domain::Item;
use crate::lazy::ThumbId;
use crate::viewer::focus::FocusTarget;
use std::rc::Rc;

/// Commands produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Removes every rendered thumbnail from the grid.
    ///
    /// Always precedes the first page after a filter or search change.
    ClearGrid,

    /// Appends a thumbnail placeholder for `item` to the grid.
    ///
    /// Invoked once per revealed item. The placeholder carries no image source
    /// until a matching [`Action::AssignSource`] arrives.
    RenderThumb {
        /// Handle the lazy-load scheduler tracks this placeholder by.
        thumb: ThumbId,
        item: Rc<Item>,
    },

    /// Assigns the real image source to a placeholder. Emitted at most once per thumb.
    AssignSource { thumb: ThumbId, url: String },

    /// Scrolls the grid so the thumbnail of `id` is centred.
    ScrollToItem { id: String },

    /// Shows `item` in the full-screen viewer.
    ShowItem {
        /// Position within the viewer's navigation sequence.
        index: usize,
        item: Rc<Item>,
    },

    /// Hides the full-screen viewer.
    HideViewer,

    /// Moves keyboard focus to a host element.
    FocusElement(FocusTarget),

    /// Rewrites the URL fragment in place (history-replacing, never pushing).
    ///
    /// `Some("#id")` sets the fragment, `None` clears it.
    ReplaceFragment(Option<String>),

    /// Starts a fire-and-forget image fetch so neighbours display instantly.
    Prefetch { url: String },

    /// Brings filter buttons and the search input in line with core state.
    ///
    /// Emitted when the core itself changes filters, e.g. a deep-link retry.
    SyncFilterControls { category: String, query: String },

    /// Brings the site search input and its result counter in line with core state.
    SyncSiteSearch { query: String, stats: String },
}
