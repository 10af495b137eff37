//! Event handling and state transition logic.
//!
//! The host translates raw input (clicks, key presses, fragment changes,
//! scroll, finished data loads) into [`Event`]s and feeds them to
//! [`handle_event`] one at a time. Each call mutates the [`Gallery`] and
//! returns whether a re-render is needed plus the [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Data**: `DataLoaded`
//! - **Grid**: `SelectCategory`, `QueryChanged`, `LoadMore`, `ViewportChanged`
//! - **Search focus**: `FocusSearch`, `BlurSearch`, `SiteQueryChanged`
//! - **Viewer**: `OpenItem`, `OpenFromCarousel`, `Next`, `Prev`, `Close`,
//!   `BackdropClicked`, `Key`
//! - **Location**: `FragmentChanged`
//! - **Carousels**: `CarouselStep`
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine::app::{handle_event, Event, Gallery};
//! use vitrine::bus::EventBus;
//! use vitrine::lazy::LazyLoadScheduler;
//! use vitrine::Theme;
//!
//! let mut gallery = Gallery::new(Rc::new(EventBus::new()), LazyLoadScheduler::immediate(), Theme::default());
//! let (needs_render, actions) = handle_event(&mut gallery, &Event::LoadMore)?;
//! assert!(!needs_render);
//! assert!(actions.is_empty());
//! # Ok::<(), vitrine::GalleryError>(())
//! ```

use super::modes::{InputFocus, SearchScope};
use crate::app::{Action, Gallery};
use crate::bus::GroupId;
use crate::domain::{RawRecord, Result};
use crate::lazy::Viewport;
use crate::source::LoadTicket;
use crate::viewer::{FocusTarget, Key};

/// Events produced by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A data load finished. Stale loads are discarded.
    DataLoaded {
        ticket: LoadTicket,
        records: Vec<RawRecord>,
    },

    /// A category filter button was activated.
    SelectCategory(String),

    /// The grid search input settled on a new value.
    QueryChanged(String),

    /// The site search input settled on a new value.
    SiteQueryChanged(String),

    /// A search input gained focus.
    FocusSearch(SearchScope),

    /// The focused search input lost focus.
    BlurSearch,

    /// The "Load more" control was activated.
    LoadMore,

    /// The grid scrolled or resized.
    ViewportChanged(Viewport),

    /// A grid thumbnail was activated.
    OpenItem {
        id: String,
        /// Element focused at the time, restored on close.
        focused: Option<FocusTarget>,
    },

    /// A carousel slide was activated.
    OpenFromCarousel {
        group: GroupId,
        id: String,
        focused: Option<FocusTarget>,
    },

    /// The viewer's next control.
    Next,

    /// The viewer's previous control.
    Prev,

    /// The viewer's close control.
    Close,

    /// A click on the viewer backdrop outside the image.
    BackdropClicked,

    /// A key press, with the element focused when it happened.
    Key {
        key: Key,
        focused: Option<FocusTarget>,
    },

    /// The location fragment changed, or was read at startup.
    FragmentChanged(String),

    /// A carousel arrow, key or swipe.
    CarouselStep { group: GroupId, delta: isize },
}

/// Processes an event, mutates gallery state, and returns actions to execute.
///
/// The boolean tells the host whether the view model changed and should be
/// re-rendered.
///
/// # Errors
///
/// Every recoverable condition is handled inside the gallery; the `Result`
/// keeps host loops uniform with fallible hosts.
pub fn handle_event(gallery: &mut Gallery, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::DataLoaded { ticket, records } => {
            tracing::debug!(records = records.len(), "data load finished");
            let actions = gallery.complete_load(*ticket, records);
            Ok((!actions.is_empty(), actions))
        }
        Event::SelectCategory(tag) => Ok((true, gallery.select_category(tag))),
        Event::QueryChanged(text) => {
            tracing::trace!(query = %text, "grid query changed");
            Ok((true, gallery.set_query(text)))
        }
        Event::SiteQueryChanged(text) => {
            let actions = gallery.set_site_query(text);
            tracing::trace!(query = %text, matches = gallery.site_stats.matches, "site query changed");
            Ok((true, actions))
        }
        Event::FocusSearch(scope) => {
            gallery.input_focus = InputFocus::Search(*scope);
            Ok((true, vec![]))
        }
        Event::BlurSearch => {
            gallery.input_focus = InputFocus::Browse;
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            let actions = gallery.load_more();
            if actions.is_empty() {
                tracing::debug!("no more items to reveal");
                return Ok((false, actions));
            }
            Ok((true, actions))
        }
        Event::ViewportChanged(viewport) => {
            let actions = gallery.scroll(*viewport);
            Ok((false, actions))
        }
        Event::OpenItem { id, focused } => {
            let actions = gallery.open_item(id, focused.clone());
            Ok((!actions.is_empty(), actions))
        }
        Event::OpenFromCarousel { group, id, focused } => {
            let actions = gallery.open_from_carousel(group, id, focused.clone());
            Ok((!actions.is_empty(), actions))
        }
        Event::Next => {
            let actions = gallery.next();
            Ok((!actions.is_empty(), actions))
        }
        Event::Prev => {
            let actions = gallery.prev();
            Ok((!actions.is_empty(), actions))
        }
        Event::Close | Event::BackdropClicked => {
            let actions = gallery.close();
            Ok((!actions.is_empty(), actions))
        }
        Event::Key { key, focused } => {
            let actions = gallery.key(key, focused.as_ref());
            Ok((!actions.is_empty(), actions))
        }
        Event::FragmentChanged(fragment) => {
            let actions = gallery.fragment_changed(fragment);
            Ok((!actions.is_empty(), actions))
        }
        Event::CarouselStep { group, delta } => {
            let moved = gallery.step_carousel(group, *delta);
            Ok((moved, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::lazy::LazyLoadScheduler;
    use crate::ui::theme::Theme;
    use std::rc::Rc;

    fn gallery() -> Gallery {
        Gallery::new(Rc::new(EventBus::new()), LazyLoadScheduler::immediate(), Theme::default())
    }

    fn records() -> Vec<RawRecord> {
        ["Red", "Green", "Blue"]
            .iter()
            .map(|title| RawRecord {
                title: Some((*title).into()),
                thumb: Some(format!("t/{title}.jpg")),
                ..RawRecord::default()
            })
            .collect()
    }

    fn load(gallery: &mut Gallery) {
        let ticket = gallery.begin_load();
        handle_event(gallery, &Event::DataLoaded { ticket, records: records() }).unwrap();
    }

    #[test]
    fn test_backdrop_click_closes_viewer() {
        let mut gallery = gallery();
        load(&mut gallery);
        handle_event(&mut gallery, &Event::OpenItem { id: "green".into(), focused: None }).unwrap();
        assert!(gallery.viewer.is_open());

        let (render, actions) = handle_event(&mut gallery, &Event::BackdropClicked).unwrap();
        assert!(render);
        assert!(actions.contains(&Action::HideViewer));
        assert!(!gallery.viewer.is_open());
    }

    #[test]
    fn test_arrow_keys_navigate_open_viewer() {
        let mut gallery = gallery();
        load(&mut gallery);
        handle_event(&mut gallery, &Event::OpenItem { id: "blue".into(), focused: None }).unwrap();

        let key = Event::Key { key: Key::ArrowRight, focused: None };
        handle_event(&mut gallery, &key).unwrap();
        assert_eq!(gallery.viewer.index(), Some(0));
    }

    #[test]
    fn test_focus_events_switch_input_focus() {
        let mut gallery = gallery();
        handle_event(&mut gallery, &Event::FocusSearch(SearchScope::Site)).unwrap();
        assert_eq!(gallery.input_focus, InputFocus::Search(SearchScope::Site));
        handle_event(&mut gallery, &Event::BlurSearch).unwrap();
        assert_eq!(gallery.input_focus, InputFocus::Browse);
    }

    #[test]
    fn test_unknown_open_requires_no_render() {
        let mut gallery = gallery();
        load(&mut gallery);
        let (render, actions) =
            handle_event(&mut gallery, &Event::OpenItem { id: "missing".into(), focused: None }).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }
}
