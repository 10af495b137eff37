//! Full-screen viewer state machine.
//!
//! The viewer is either [`ViewerStatus::Closed`] or [`ViewerStatus::Open`] at a
//! position. It never holds an item: every access re-resolves the position
//! against the navigation sequence passed in, so a filter change can never
//! leave it pointing at a stale object.
//!
//! # Transitions
//!
//! ```text
//!            open(id) found
//!  Closed ─────────────────────▶ Open{index}
//!    ▲                            │  next()/prev(): index ± 1 (wraps)
//!    └──────────── close() ───────┘  open(other): close() then open()
//! ```
//!
//! Every transition returns the [`Action`]s the host must perform: show or
//! hide the viewer, rewrite the URL fragment (history-replacing), move focus,
//! and prefetch the neighbouring images. Entering `Open` and navigating also
//! publish a [`BusMessage::PositionSync`] so carousels re-centre.
//!
//! # Modules
//!
//! - [`deeplink`]: URL fragment codec
//! - [`focus`]: Focus handles and the focus trap
//! - [`keys`]: Keyboard input mapping

pub mod deeplink;
pub mod focus;
pub mod keys;

pub use focus::{FocusTarget, FocusTrap};
pub use keys::Key;

use crate::app::Action;
use crate::bus::{BusMessage, EventBus, GroupId};
use crate::domain::Item;
use crate::filter::FilteredView;
use serde::Serialize;
use std::rc::Rc;

/// Whether the viewer is showing an item, and which position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerStatus {
    Closed,
    Open { index: usize },
}

/// Host-facing snapshot: `index` is `-1` while closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerState {
    pub is_open: bool,
    pub index: i64,
}

impl From<ViewerStatus> for ViewerState {
    fn from(status: ViewerStatus) -> Self {
        match status {
            ViewerStatus::Closed => Self { is_open: false, index: -1 },
            ViewerStatus::Open { index } => Self {
                is_open: true,
                index: i64::try_from(index).unwrap_or(i64::MAX),
            },
        }
    }
}

/// Where an `open` request came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOrigin {
    /// Rendering context that owns the navigation sequence.
    pub group: GroupId,
    /// Element focused before opening; focus returns here on close.
    pub focused: Option<FocusTarget>,
}

/// Text and image shown by the viewer for the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerCaption {
    pub title: String,
    pub description: String,
    pub date_line: String,
    pub image_url: String,
}

impl ViewerCaption {
    fn for_item(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description_or_placeholder().to_string(),
            date_line: item.caption_date(),
            image_url: item.display_source().to_string(),
        }
    }
}

/// The viewer context object.
///
/// Replaces loose module state (current index, last-focused element, key
/// handler) with explicit fields. Constructed once and owned by the
/// [`Gallery`](crate::app::Gallery).
#[derive(Debug)]
pub struct Viewer {
    status: ViewerStatus,
    group: Option<GroupId>,
    restore_focus: Option<FocusTarget>,
    trap: Option<FocusTrap>,
    controls: Vec<FocusTarget>,
    bus: Rc<EventBus>,
}

impl Viewer {
    /// Creates a closed viewer whose interactive controls are `controls`, in tab order.
    #[must_use]
    pub fn new(bus: Rc<EventBus>, controls: Vec<FocusTarget>) -> Self {
        Self {
            status: ViewerStatus::Closed,
            group: None,
            restore_focus: None,
            trap: None,
            controls,
            bus,
        }
    }

    #[must_use]
    pub const fn status(&self) -> ViewerStatus {
        self.status
    }

    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.status.into()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.status, ViewerStatus::Open { .. })
    }

    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self.status {
            ViewerStatus::Open { index } => Some(index),
            ViewerStatus::Closed => None,
        }
    }

    /// Rendering context of the current navigation sequence, while open.
    #[must_use]
    pub const fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    /// Whether the focus trap is currently installed.
    #[must_use]
    pub const fn is_trapping_focus(&self) -> bool {
        self.trap.is_some()
    }

    /// Resolves the current position against `view`.
    #[must_use]
    pub fn current<'v>(&self, view: &'v FilteredView) -> Option<&'v Rc<Item>> {
        self.index().and_then(|index| view.get(index))
    }

    #[must_use]
    pub fn caption(&self, view: &FilteredView) -> Option<ViewerCaption> {
        self.current(view).map(|item| ViewerCaption::for_item(item))
    }

    /// Opens the viewer on `item_id`.
    ///
    /// Returns `None` when `item_id` is not in `view`: the request is rejected
    /// and nothing changes. Opening a different item while already open is a
    /// `close()` followed by an `open()`; focus still returns to the element
    /// recorded by the first open.
    pub fn open(&mut self, item_id: &str, view: &FilteredView, origin: OpenOrigin) -> Option<Vec<Action>> {
        let _span = tracing::debug_span!("viewer_open", item_id = %item_id, group = %origin.group).entered();

        let Some(index) = view.position(item_id) else {
            tracing::debug!("open rejected, item not in view");
            return None;
        };

        let mut actions = Vec::new();
        let mut focused = origin.focused;

        if let ViewerStatus::Open { index: current } = self.status {
            if current == index && self.group.as_ref() == Some(&origin.group) {
                tracing::trace!("already open on this item");
                return Some(actions);
            }
            focused = self.restore_focus.clone().or(focused);
            actions.extend(self.close());
        }

        self.status = ViewerStatus::Open { index };
        self.group = Some(origin.group);
        self.restore_focus = focused;

        let trap = FocusTrap::new(self.controls.clone());
        if let Some(first) = trap.first() {
            actions.push(Action::FocusElement(first.clone()));
        }
        self.trap = Some(trap);

        actions.extend(self.after_move(view));
        tracing::debug!(index, "viewer opened");
        Some(actions)
    }

    /// Advances to the next item, wrapping past the end.
    pub fn next(&mut self, view: &FilteredView) -> Vec<Action> {
        self.step(view, 1)
    }

    /// Moves to the previous item, wrapping past the start.
    pub fn prev(&mut self, view: &FilteredView) -> Vec<Action> {
        self.step(view, -1)
    }

    fn step(&mut self, view: &FilteredView, offset: isize) -> Vec<Action> {
        let ViewerStatus::Open { index } = self.status else {
            return Vec::new();
        };
        let len = view.len();
        if len == 0 {
            return Vec::new();
        }

        let current = index.min(len - 1);
        let next = if offset >= 0 {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.status = ViewerStatus::Open { index: next };

        tracing::debug!(from = current, to = next, len, "viewer navigated");
        self.after_move(view)
    }

    /// Closes the viewer, clears the fragment and restores focus.
    pub fn close(&mut self) -> Vec<Action> {
        if !self.is_open() {
            return Vec::new();
        }

        self.status = ViewerStatus::Closed;
        self.group = None;
        self.trap = None;

        let mut actions = vec![Action::HideViewer, Action::ReplaceFragment(None)];
        if let Some(target) = self.restore_focus.take() {
            actions.push(Action::FocusElement(target));
        }
        tracing::debug!("viewer closed");
        actions
    }

    /// Moves the open viewer to `index` without any side effects.
    ///
    /// Used when the navigation sequence is recomputed and the displayed item
    /// now sits at a different position.
    pub(crate) fn reposition(&mut self, index: usize) {
        if self.is_open() {
            self.status = ViewerStatus::Open { index };
        }
    }

    /// Routes a key press while open. Keys are ignored while closed.
    pub fn handle_key(&mut self, key: &Key, view: &FilteredView, focused: Option<&FocusTarget>) -> Vec<Action> {
        if !self.is_open() {
            return Vec::new();
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowRight => self.next(view),
            Key::ArrowLeft => self.prev(view),
            Key::Tab { shift } => self
                .trap
                .as_ref()
                .and_then(|trap| trap.on_tab(focused, *shift))
                .map(Action::FocusElement)
                .into_iter()
                .collect(),
            Key::Enter | Key::Other(_) => Vec::new(),
        }
    }

    /// Effects shared by every transition that lands on an item.
    fn after_move(&self, view: &FilteredView) -> Vec<Action> {
        let Some(index) = self.index() else {
            return Vec::new();
        };
        let Some(item) = view.get(index) else {
            return Vec::new();
        };

        let mut actions = vec![
            Action::ShowItem {
                index,
                item: Rc::clone(item),
            },
            Action::ReplaceFragment(Some(deeplink::fragment_for(&item.id))),
        ];
        actions.extend(Self::prefetch_neighbours(view, index));

        if let Some(group) = &self.group {
            self.bus.publish(&BusMessage::position_sync(
                group.clone(),
                index,
                Some(item.id.clone()),
            ));
        }
        actions
    }

    fn prefetch_neighbours(view: &FilteredView, index: usize) -> Vec<Action> {
        let len = view.len();
        if len < 2 {
            return Vec::new();
        }

        let before = (index + len - 1) % len;
        let after = (index + 1) % len;
        let mut neighbours = vec![before];
        if after != before {
            neighbours.push(after);
        }

        neighbours
            .into_iter()
            .filter_map(|i| view.get(i))
            .map(|item| item.display_source())
            .filter(|url| !url.is_empty())
            .map(|url| Action::Prefetch { url: url.to_string() })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn view(ids: &[&str]) -> FilteredView {
        FilteredView::new(
            ids.iter()
                .map(|id| {
                    Rc::new(Item {
                        id: (*id).to_string(),
                        thumb_url: format!("t/{id}.jpg"),
                        full_url: format!("f/{id}.jpg"),
                        title: id.to_uppercase(),
                        description: String::new(),
                        date: String::new(),
                        collection: "all".into(),
                    })
                })
                .collect(),
        )
    }

    fn origin(focused: Option<&str>) -> OpenOrigin {
        OpenOrigin {
            group: GroupId::new("grid"),
            focused: focused.map(FocusTarget::new),
        }
    }

    fn viewer() -> Viewer {
        Viewer::new(Rc::new(EventBus::new()), focus::default_controls())
    }

    #[test]
    fn test_open_sets_index_fragment_and_focus() {
        let v = view(&["a", "b", "c"]);
        let mut viewer = viewer();
        let actions = viewer.open("b", &v, origin(Some("thumb-b"))).unwrap();

        assert_eq!(viewer.status(), ViewerStatus::Open { index: 1 });
        assert!(viewer.is_trapping_focus());
        assert!(actions.contains(&Action::FocusElement(FocusTarget::new("viewer-close"))));
        assert!(actions.contains(&Action::ReplaceFragment(Some("#b".into()))));
        assert!(actions.contains(&Action::Prefetch { url: "f/a.jpg".into() }));
        assert!(actions.contains(&Action::Prefetch { url: "f/c.jpg".into() }));
    }

    #[test]
    fn test_open_unknown_is_rejected_without_change() {
        let v = view(&["a"]);
        let mut viewer = viewer();
        assert!(viewer.open("zzz", &v, origin(None)).is_none());
        assert_eq!(viewer.state(), ViewerState { is_open: false, index: -1 });
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let v = view(&["a", "b", "c"]);
        let mut viewer = viewer();
        viewer.open("c", &v, origin(None)).unwrap();
        let _ = viewer.next(&v);
        assert_eq!(viewer.index(), Some(0));
        let _ = viewer.prev(&v);
        assert_eq!(viewer.index(), Some(2));
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let v = view(&["a", "b", "c", "d", "e"]);
        let mut viewer = viewer();
        viewer.open("b", &v, origin(None)).unwrap();
        for _ in 0..v.len() {
            let _ = viewer.next(&v);
        }
        assert_eq!(viewer.index(), Some(1));
        for _ in 0..v.len() {
            let _ = viewer.prev(&v);
        }
        assert_eq!(viewer.index(), Some(1));
    }

    #[test]
    fn test_close_clears_fragment_and_restores_focus() {
        let v = view(&["a", "b"]);
        let mut viewer = viewer();
        viewer.open("a", &v, origin(Some("thumb-a"))).unwrap();
        let actions = viewer.close();

        assert_eq!(
            actions,
            vec![
                Action::HideViewer,
                Action::ReplaceFragment(None),
                Action::FocusElement(FocusTarget::new("thumb-a")),
            ]
        );
        assert_eq!(viewer.state().index, -1);
        assert!(!viewer.is_trapping_focus());
        assert!(viewer.close().is_empty());
    }

    #[test]
    fn test_reentrant_open_closes_first_and_keeps_original_focus() {
        let v = view(&["a", "b"]);
        let mut viewer = viewer();
        viewer.open("a", &v, origin(Some("thumb-a"))).unwrap();
        let actions = viewer.open("b", &v, origin(Some("viewer-close"))).unwrap();

        assert_eq!(actions[0], Action::HideViewer);
        assert_eq!(viewer.index(), Some(1));

        let closing = viewer.close();
        assert!(closing.contains(&Action::FocusElement(FocusTarget::new("thumb-a"))));
    }

    #[test]
    fn test_keys_route_to_transitions() {
        let v = view(&["a", "b"]);
        let mut viewer = viewer();
        assert!(viewer.handle_key(&Key::ArrowRight, &v, None).is_empty());

        viewer.open("a", &v, origin(None)).unwrap();
        let _ = viewer.handle_key(&Key::ArrowRight, &v, None);
        assert_eq!(viewer.index(), Some(1));
        let _ = viewer.handle_key(&Key::ArrowLeft, &v, None);
        assert_eq!(viewer.index(), Some(0));

        let tab = viewer.handle_key(&Key::Tab { shift: false }, &v, Some(&FocusTarget::new("viewer-next")));
        assert_eq!(tab, vec![Action::FocusElement(FocusTarget::new("viewer-close"))]);

        let _ = viewer.handle_key(&Key::Escape, &v, None);
        assert!(!viewer.is_open());
    }

    #[test]
    fn test_navigation_publishes_position_sync() {
        let bus = Rc::new(EventBus::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(move |msg| {
            sink.borrow_mut().push(msg.clone());
            Ok(())
        });

        let v = view(&["a", "b"]);
        let mut viewer = Viewer::new(Rc::clone(&bus), focus::default_controls());
        viewer.open("a", &v, origin(None)).unwrap();
        let _ = viewer.next(&v);

        assert_eq!(
            *seen.borrow(),
            vec![
                BusMessage::position_sync(GroupId::new("grid"), 0, Some("a".into())),
                BusMessage::position_sync(GroupId::new("grid"), 1, Some("b".into())),
            ]
        );
    }

    #[test]
    fn test_single_item_wraps_to_itself_without_prefetch() {
        let v = view(&["a"]);
        let mut viewer = viewer();
        viewer.open("a", &v, origin(None)).unwrap();
        let actions = viewer.next(&v);
        assert_eq!(viewer.index(), Some(0));
        assert!(!actions.iter().any(|a| matches!(a, Action::Prefetch { .. })));
    }
}
