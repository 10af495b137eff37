//! Gallery context object and view model computation.
//!
//! [`Gallery`] replaces the scattered module-level variables of a page script
//! (filtered list, current page, viewer index, last focused element) with one
//! owned context. Every operation mutates it and returns the [`Action`]s the
//! host must perform.
//!
//! # State Components
//!
//! - **Store**: Normalized items, replaced wholesale on each applied load
//! - **Filters**: Active category and query, and the resulting [`FilteredView`]
//! - **Pagination**: How much of the view the grid has revealed
//! - **Viewer**: Open/closed state over the grid or a carousel's sequence
//! - **Carousels**: Per-collection groups, site search and attached widgets
//! - **Fragment**: The item id currently addressed by the location fragment
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine::app::Gallery;
//! use vitrine::bus::EventBus;
//! use vitrine::lazy::LazyLoadScheduler;
//! use vitrine::{RawRecord, Theme};
//!
//! let mut gallery = Gallery::new(Rc::new(EventBus::new()), LazyLoadScheduler::immediate(), Theme::default());
//! let ticket = gallery.begin_load();
//! let records = vec![RawRecord { title: Some("Dusk".into()), ..Default::default() }];
//! let actions = gallery.complete_load(ticket, &records);
//! assert!(!actions.is_empty());
//! assert_eq!(gallery.view.ids(), vec!["dusk"]);
//! ```

use super::modes::{InputFocus, SearchScope};
use super::Action;
use crate::bus::{EventBus, GroupId};
use crate::carousel::{CarouselDeck, CarouselWidget};
use crate::domain::{Item, RawRecord};
use crate::filter::{self, Category, FilteredView, Query, SearchStats, ALL_CATEGORIES};
use crate::lazy::{LazyLoadScheduler, ThumbId, Viewport};
use crate::pager::Paginator;
use crate::source::{LoadTicket, LoadTracker};
use crate::store::ItemStore;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CarouselRow, EmptyState, FilterChip, FooterInfo, GalleryViewModel, HeaderInfo, LoadMoreInfo,
    SearchBarInfo, ThumbCard, ViewerPanel,
};
use crate::viewer::{deeplink, focus, FocusTarget, Key, OpenOrigin, Viewer};
use std::cell::RefCell;
use std::rc::Rc;

/// Group id of the grid, the viewer's default navigation context.
pub const GRID_GROUP: &str = "gallery-grid";

/// Central gallery state.
#[derive(Debug)]
pub struct Gallery {
    /// Normalized items of the last applied load.
    pub store: ItemStore,

    /// Active category filter.
    pub category: Category,

    /// Active grid search query.
    pub query: Query,

    /// Items passing `category` and `query`, in store order.
    ///
    /// Recomputed by [`Gallery::apply_filters`] and never edited in place.
    pub view: FilteredView,

    /// How much of `view` the grid has revealed.
    pub pager: Paginator,

    pub viewer: Viewer,

    pub lazy: LazyLoadScheduler,

    /// Carousel groups, rebuilt on every applied load.
    pub deck: CarouselDeck,

    /// One attached widget per carousel group, in deck order.
    pub widgets: Vec<Rc<RefCell<CarouselWidget>>>,

    /// Result counter of the last site search.
    pub site_stats: SearchStats,

    /// Where non-viewer key presses are directed.
    pub input_focus: InputFocus,

    /// Item id addressed by the location fragment, if any.
    pub fragment: Option<String>,

    /// Color scheme for rendering.
    pub theme: Theme,

    bus: Rc<EventBus>,
    grid_group: GroupId,
    loads: LoadTracker,
    loaded: bool,
    thumbs: Vec<(ThumbId, Rc<Item>)>,
    next_thumb: u64,
}

impl Gallery {
    /// Creates an empty gallery. Nothing is shown until a load completes.
    #[must_use]
    pub fn new(bus: Rc<EventBus>, lazy: LazyLoadScheduler, theme: Theme) -> Self {
        Self {
            store: ItemStore::new(),
            category: Category::all(),
            query: Query::default(),
            view: FilteredView::default(),
            pager: Paginator::new(),
            viewer: Viewer::new(Rc::clone(&bus), focus::default_controls()),
            lazy,
            deck: CarouselDeck::new(&[], Rc::clone(&bus)),
            widgets: Vec::new(),
            site_stats: SearchStats { matches: 0, active: false },
            input_focus: InputFocus::Browse,
            fragment: None,
            theme,
            bus,
            grid_group: GroupId::new(GRID_GROUP),
            loads: LoadTracker::default(),
            loaded: false,
            thumbs: Vec::new(),
            next_thumb: 0,
        }
    }

    #[must_use]
    pub const fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// Whether any load has been applied yet.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Thumbnails currently rendered in the grid, in slot order.
    #[must_use]
    pub fn rendered_thumbs(&self) -> &[(ThumbId, Rc<Item>)] {
        &self.thumbs
    }

    /// Issues a ticket for a data load that is about to start.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loads.begin()
    }

    /// Applies the records of a finished load.
    ///
    /// A load that finishes after a newer one was already applied is dropped.
    /// A deep link recorded before the data arrived is resolved afterwards.
    pub fn complete_load(&mut self, ticket: LoadTicket, records: &[RawRecord]) -> Vec<Action> {
        let _span = tracing::debug_span!("complete_load", records = records.len()).entered();

        if !self.loads.complete(ticket) {
            return Vec::new();
        }

        let mut actions = self.viewer.close();
        let pending = self.fragment.take();

        self.store.load(records);
        self.loaded = true;
        self.rebuild_carousels();
        actions.extend(self.apply_filters());

        if let Some(id) = pending {
            self.fragment = Some(id.clone());
            actions.extend(self.resolve_deep_link(&id));
        }
        self.track_fragment(&actions);
        actions
    }

    fn rebuild_carousels(&mut self) {
        for widget in self.widgets.drain(..) {
            widget.borrow_mut().detach(&self.bus);
        }

        let site_query = self.deck.query().clone();
        self.deck = CarouselDeck::new(self.store.items(), Rc::clone(&self.bus));
        self.widgets = self
            .deck
            .group_ids()
            .into_iter()
            .filter_map(|group| {
                let track = self.deck.track(&group)?;
                Some(CarouselWidget::attach(group, track, &self.bus))
            })
            .collect();

        if !site_query.is_empty() {
            self.site_stats = self.deck.search(site_query);
        }
        tracing::debug!(widgets = self.widgets.len(), "carousels rebuilt");
    }

    /// Recomputes the filtered view and re-renders the grid from its first page.
    ///
    /// An open grid viewer follows its item to the new position, or closes if
    /// the item was filtered out. A fragment naming a filtered-out item is
    /// cleared.
    pub fn apply_filters(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("apply_filters",
            category = %self.category,
            query = %self.query.as_str()
        ).entered();

        let displayed = self
            .viewing_grid()
            .then(|| self.viewer.current(&self.view).map(|item| item.id.clone()))
            .flatten();

        self.view = filter::apply(self.store.items(), &self.category, &self.query);
        self.pager.reset();
        self.lazy.reset();
        self.thumbs.clear();

        let mut actions = vec![Action::ClearGrid];
        let page = self.pager.reveal_next(&self.view);
        actions.extend(self.render_thumbs(page));

        if let Some(id) = displayed {
            match self.view.position(&id) {
                Some(index) => self.viewer.reposition(index),
                None => actions.extend(self.viewer.close()),
            }
        }

        let fragment_gone = self
            .fragment
            .as_deref()
            .is_some_and(|id| self.view.position(id).is_none());
        let cleared = actions.contains(&Action::ReplaceFragment(None));
        if fragment_gone && !cleared && !self.viewing_carousel() {
            tracing::debug!("fragment item filtered out, clearing fragment");
            actions.push(Action::ReplaceFragment(None));
        }

        self.track_fragment(&actions);
        actions
    }

    /// Switches the category filter.
    pub fn select_category(&mut self, tag: &str) -> Vec<Action> {
        self.category = Category::new(tag);
        self.apply_filters()
    }

    /// Replaces the grid search query. Callers debounce keystrokes.
    pub fn set_query(&mut self, input: &str) -> Vec<Action> {
        self.query = Query::parse(input);
        self.apply_filters()
    }

    /// Runs a site search over the carousels. The result counter lands in
    /// `site_stats`.
    ///
    /// A viewer opened from a carousel follows its item into the group's new
    /// non-dimmed sequence, or closes if the item is now dimmed.
    pub fn set_site_query(&mut self, input: &str) -> Vec<Action> {
        let displayed = self
            .viewer
            .group()
            .filter(|group| **group != self.grid_group)
            .cloned()
            .and_then(|group| {
                let id = self.viewer.current(&self.deck.visible(&group))?.id.clone();
                Some((group, id))
            });

        self.site_stats = self.deck.search(Query::parse(input));

        let Some((group, id)) = displayed else {
            return Vec::new();
        };
        let actions = match self.deck.visible(&group).position(&id) {
            Some(index) => {
                self.viewer.reposition(index);
                Vec::new()
            }
            None => {
                tracing::debug!(group = %group, item_id = %id, "viewed item dimmed by site search, closing viewer");
                self.viewer.close()
            }
        };
        self.track_fragment(&actions);
        actions
    }

    /// Reveals the next grid page.
    pub fn load_more(&mut self) -> Vec<Action> {
        if !self.pager.has_more(&self.view) {
            return Vec::new();
        }
        let page = self.pager.reveal_next(&self.view);
        self.render_thumbs(page)
    }

    fn render_thumbs(&mut self, items: Vec<Rc<Item>>) -> Vec<Action> {
        let mut actions = Vec::with_capacity(items.len() * 2);
        for item in items {
            let thumb = ThumbId(self.next_thumb);
            self.next_thumb += 1;
            let slot = self.thumbs.len();

            actions.push(Action::RenderThumb {
                thumb,
                item: Rc::clone(&item),
            });
            actions.extend(self.lazy.watch(thumb, slot, item.thumb_source()));
            self.thumbs.push((thumb, item));
        }
        actions
    }

    /// Forwards a viewport change to the lazy loader.
    pub fn scroll(&mut self, viewport: Viewport) -> Vec<Action> {
        self.lazy.viewport_changed(viewport)
    }

    /// Opens the viewer on a grid item.
    pub fn open_item(&mut self, id: &str, focused: Option<FocusTarget>) -> Vec<Action> {
        let origin = OpenOrigin {
            group: self.grid_group.clone(),
            focused,
        };
        let Some(actions) = self.viewer.open(id, &self.view, origin) else {
            return Vec::new();
        };
        self.track_fragment(&actions);
        actions
    }

    /// Opens the viewer on a carousel item, navigating that group's non-dimmed items.
    ///
    /// Dimmed items cannot be opened.
    pub fn open_from_carousel(&mut self, group: &GroupId, id: &str, focused: Option<FocusTarget>) -> Vec<Action> {
        if self.deck.is_dimmed(group, id) {
            tracing::debug!(group = %group, item_id = %id, "dimmed item cannot be opened");
            return Vec::new();
        }

        let sequence = self.deck.visible(group);
        let origin = OpenOrigin {
            group: group.clone(),
            focused,
        };
        let Some(actions) = self.viewer.open(id, &sequence, origin) else {
            return Vec::new();
        };
        self.track_fragment(&actions);
        actions
    }

    pub fn next(&mut self) -> Vec<Action> {
        self.navigate(Viewer::next)
    }

    pub fn prev(&mut self) -> Vec<Action> {
        self.navigate(Viewer::prev)
    }

    pub fn close(&mut self) -> Vec<Action> {
        let actions = self.viewer.close();
        self.track_fragment(&actions);
        actions
    }

    /// Routes a key press: the open viewer first, then a focused search input.
    pub fn key(&mut self, key: &Key, focused: Option<&FocusTarget>) -> Vec<Action> {
        if self.viewer.is_open() {
            return self.navigate(|viewer, sequence| viewer.handle_key(key, sequence, focused));
        }

        match (self.input_focus, key) {
            (InputFocus::Search(SearchScope::Grid), Key::Enter) => {
                let Some(first) = self.view.get(0).map(|item| item.id.clone()) else {
                    return Vec::new();
                };
                self.open_item(&first, focused.cloned())
            }
            (InputFocus::Search(SearchScope::Grid), Key::Escape) => {
                let mut actions = vec![Action::SyncFilterControls {
                    category: self.category.to_string(),
                    query: String::new(),
                }];
                actions.extend(self.set_query(""));
                actions
            }
            (InputFocus::Search(SearchScope::Site), Key::Enter) => {
                let Some((group, first)) = self.deck.first_match() else {
                    return Vec::new();
                };
                self.open_from_carousel(&group, &first.id, focused.cloned())
            }
            (InputFocus::Search(SearchScope::Site), Key::Escape) => {
                let mut actions = self.set_site_query("");
                actions.push(Action::SyncSiteSearch {
                    query: String::new(),
                    stats: self.site_stats.to_string(),
                });
                actions
            }
            _ => Vec::new(),
        }
    }

    /// Handles a location fragment change (initial load, back/forward, manual edit).
    ///
    /// An empty fragment closes the viewer. A fragment that does not decode is
    /// ignored.
    pub fn fragment_changed(&mut self, fragment: &str) -> Vec<Action> {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment);
        if raw.is_empty() {
            self.fragment = None;
            return self.close();
        }

        let Some(id) = deeplink::parse_fragment(fragment) else {
            tracing::debug!(fragment = %fragment, "ignoring malformed fragment");
            return Vec::new();
        };

        self.fragment = Some(id.clone());
        if !self.loaded {
            tracing::debug!(item_id = %id, "deferring deep link until data is loaded");
            return Vec::new();
        }
        self.resolve_deep_link(&id)
    }

    /// Opens the viewer on the item a deep link names.
    ///
    /// Pages are revealed until the item is on screen. When active filters hide
    /// the item they are reset to "all" and an empty query, once, before giving
    /// up; an unresolvable link leaves the viewer closed and clears the fragment.
    pub fn resolve_deep_link(&mut self, id: &str) -> Vec<Action> {
        let _span = tracing::debug_span!("resolve_deep_link", item_id = %id).entered();

        if self.viewing_grid() && self.viewer.current(&self.view).is_some_and(|item| item.id == id) {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if self.view.position(id).is_none() && (!self.category.is_all() || !self.query.is_empty()) {
            tracing::debug!("deep link target filtered out, resetting filters");
            self.category = Category::all();
            self.query = Query::default();
            actions.push(Action::SyncFilterControls {
                category: ALL_CATEGORIES.to_string(),
                query: String::new(),
            });
            actions.extend(self.apply_filters());
        }

        let Some(index) = self.view.position(id) else {
            tracing::debug!("deep link target not found");
            if self.fragment.is_some() {
                actions.push(Action::ReplaceFragment(None));
            }
            self.track_fragment(&actions);
            return actions;
        };

        let revealed = self.pager.reveal_through(&self.view, index);
        actions.extend(self.render_thumbs(revealed));
        actions.push(Action::ScrollToItem { id: id.to_string() });
        actions.extend(self.open_item(id, None));

        self.track_fragment(&actions);
        actions
    }

    /// Moves a carousel by one slide. Returns whether it moved.
    pub fn step_carousel(&mut self, group: &GroupId, delta: isize) -> bool {
        self.widgets
            .iter()
            .find(|widget| widget.borrow().group() == group)
            .is_some_and(|widget| widget.borrow_mut().step(delta))
    }

    /// Runs a viewer transition against the sequence the viewer navigates.
    fn navigate<F>(&mut self, transition: F) -> Vec<Action>
    where
        F: FnOnce(&mut Viewer, &FilteredView) -> Vec<Action>,
    {
        let carousel_sequence;
        let sequence = match self.viewer.group() {
            Some(group) if *group != self.grid_group => {
                carousel_sequence = self.deck.visible(group);
                &carousel_sequence
            }
            _ => &self.view,
        };

        let actions = transition(&mut self.viewer, sequence);
        self.track_fragment(&actions);
        actions
    }

    fn viewing_grid(&self) -> bool {
        self.viewer.group() == Some(&self.grid_group)
    }

    fn viewing_carousel(&self) -> bool {
        self.viewer.group().is_some_and(|group| *group != self.grid_group)
    }

    /// Keeps `fragment` in step with the fragment writes the host will perform.
    fn track_fragment(&mut self, actions: &[Action]) {
        for action in actions {
            if let Action::ReplaceFragment(fragment) = action {
                self.fragment = fragment.as_deref().and_then(deeplink::parse_fragment);
            }
        }
    }

    /// Computes a renderable view model from current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> GalleryViewModel {
        let thumbs = self
            .thumbs
            .iter()
            .map(|(thumb, item)| ThumbCard::new(item, self.lazy.is_loaded(*thumb), &self.query))
            .collect();

        let viewer = self.viewer.index().and_then(|index| {
            let sequence = match self.viewer.group() {
                Some(group) if *group != self.grid_group => self.deck.visible(group),
                _ => self.view.clone(),
            };
            self.viewer
                .caption(&sequence)
                .map(|caption| ViewerPanel::new(caption, index, sequence.len()))
        });

        let carousels = self
            .widgets
            .iter()
            .map(|widget| CarouselRow::from_widget(&widget.borrow()))
            .collect();

        GalleryViewModel {
            header: HeaderInfo::new(self.pager.revealed_count(), self.view.len(), self.store.len()),
            filters: self.compute_filters(),
            search_bar: SearchBarInfo {
                query: self.query.as_str().to_string(),
                stats: SearchStats {
                    matches: self.view.len(),
                    active: !self.query.is_empty(),
                }
                .to_string(),
                focused: self.input_focus == InputFocus::Search(SearchScope::Grid),
            },
            thumbs,
            load_more: LoadMoreInfo::new(self.pager.has_more(&self.view)),
            site_search: SearchBarInfo {
                query: self.deck.query().as_str().to_string(),
                stats: self.site_stats.to_string(),
                focused: self.input_focus == InputFocus::Search(SearchScope::Site),
            },
            carousels,
            viewer,
            empty_state: self.compute_empty_state(),
            footer: FooterInfo::for_state(self.viewer.is_open(), self.input_focus),
        }
    }

    fn compute_filters(&self) -> Vec<FilterChip> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(
                self.store
                    .collections()
                    .into_iter()
                    .filter(|c| c != ALL_CATEGORIES),
            )
            .map(|label| FilterChip {
                active: label == self.category.as_str(),
                label,
            })
            .collect()
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.store.is_empty() {
            return Some(EmptyState {
                message: "No items to show".to_string(),
                subtitle: "The gallery data could not be loaded".to_string(),
            });
        }
        self.view.is_empty().then(|| EmptyState {
            message: "No matching items".to_string(),
            subtitle: "Try another category or search".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, collection: &str) -> RawRecord {
        RawRecord {
            id: Some(id.into()),
            title: Some(title.into()),
            thumb: Some(format!("t/{id}.jpg")),
            full: Some(format!("f/{id}.jpg")),
            collection: Some(collection.into()),
            ..RawRecord::default()
        }
    }

    fn loaded(records: &[RawRecord]) -> Gallery {
        let mut gallery = Gallery::new(
            Rc::new(EventBus::new()),
            LazyLoadScheduler::immediate(),
            Theme::default(),
        );
        let ticket = gallery.begin_load();
        gallery.complete_load(ticket, records);
        gallery
    }

    fn many(n: usize) -> Vec<RawRecord> {
        (0..n).map(|i| record(&format!("item-{i}"), &format!("Item {i}"), "all")).collect()
    }

    #[test]
    fn test_first_page_rendered_after_load() {
        let gallery = loaded(&many(30));
        assert_eq!(gallery.rendered_thumbs().len(), 24);
        assert!(gallery.compute_viewmodel().load_more.enabled);
    }

    #[test]
    fn test_load_more_until_exhausted() {
        let mut gallery = loaded(&many(30));
        let actions = gallery.load_more();
        let rendered = actions.iter().filter(|a| matches!(a, Action::RenderThumb { .. })).count();
        assert_eq!(rendered, 6);
        assert!(gallery.load_more().is_empty());

        let vm = gallery.compute_viewmodel();
        assert_eq!(vm.load_more.label, "No more items");
        assert!(!vm.load_more.enabled);
    }

    #[test]
    fn test_filter_change_clears_grid_first() {
        let mut gallery = loaded(&[record("a", "A", "x"), record("b", "B", "y")]);
        let actions = gallery.select_category("y");
        assert_eq!(actions[0], Action::ClearGrid);
        assert_eq!(gallery.view.ids(), vec!["b"]);
    }

    #[test]
    fn test_open_viewer_follows_item_across_filter_change() {
        let mut gallery = loaded(&[record("a", "A", "x"), record("b", "B", "y"), record("c", "C", "y")]);
        gallery.open_item("c", None);
        assert_eq!(gallery.viewer.index(), Some(2));

        gallery.select_category("y");
        assert_eq!(gallery.viewer.index(), Some(1));

        let actions = gallery.select_category("x");
        assert!(!gallery.viewer.is_open());
        assert!(actions.contains(&Action::HideViewer));
        assert_eq!(gallery.fragment, None);
    }

    #[test]
    fn test_fragment_cleared_when_item_filtered_out() {
        let mut gallery = loaded(&[record("a", "A", "x"), record("b", "B", "y")]);
        gallery.fragment = Some("a".into());
        let actions = gallery.select_category("y");
        assert!(actions.contains(&Action::ReplaceFragment(None)));
        assert_eq!(gallery.fragment, None);
    }

    #[test]
    fn test_deep_link_reveals_pages_before_opening() {
        let mut gallery = loaded(&many(60));
        let actions = gallery.fragment_changed("#item-50");

        assert_eq!(gallery.pager.revealed_count(), 60);
        assert!(actions.contains(&Action::ScrollToItem { id: "item-50".into() }));
        assert_eq!(gallery.viewer.index(), Some(50));
        assert_eq!(gallery.fragment.as_deref(), Some("item-50"));
    }

    #[test]
    fn test_deep_link_before_load_is_deferred() {
        let mut gallery = Gallery::new(
            Rc::new(EventBus::new()),
            LazyLoadScheduler::immediate(),
            Theme::default(),
        );
        assert!(gallery.fragment_changed("#b").is_empty());

        let ticket = gallery.begin_load();
        gallery.complete_load(ticket, &[record("a", "A", "x"), record("b", "B", "x")]);
        assert_eq!(gallery.viewer.index(), Some(1));
    }

    #[test]
    fn test_empty_fragment_closes_viewer() {
        let mut gallery = loaded(&[record("a", "A", "x")]);
        gallery.open_item("a", None);
        gallery.fragment_changed("");
        assert!(!gallery.viewer.is_open());
    }

    #[test]
    fn test_malformed_fragment_is_ignored() {
        let mut gallery = loaded(&[record("a", "A", "x")]);
        gallery.open_item("a", None);
        assert!(gallery.fragment_changed("#%E0%A4").is_empty());
        assert!(gallery.viewer.is_open());
    }

    #[test]
    fn test_search_enter_opens_first_result_and_escape_clears() {
        let mut gallery = loaded(&[record("a", "Harbour", "x"), record("b", "Sunset", "x")]);
        gallery.input_focus = InputFocus::Search(SearchScope::Grid);
        gallery.set_query("sun");

        gallery.key(&Key::Enter, None);
        assert_eq!(gallery.viewer.index(), Some(0));
        gallery.close();

        let actions = gallery.key(&Key::Escape, None);
        assert!(actions.contains(&Action::SyncFilterControls {
            category: "all".into(),
            query: String::new()
        }));
        assert_eq!(gallery.view.len(), 2);
    }

    #[test]
    fn test_dimmed_carousel_item_cannot_be_opened() {
        let mut gallery = loaded(&[record("a", "Harbour", "x"), record("b", "Sunset", "x")]);
        gallery.set_site_query("sunset");

        let group = GroupId::new("x");
        assert!(gallery.open_from_carousel(&group, "a", None).is_empty());
        gallery.open_from_carousel(&group, "b", None);
        assert_eq!(gallery.viewer.index(), Some(0));

        // The carousel sequence holds only the match, so navigation stays on it.
        gallery.next();
        assert_eq!(gallery.viewer.index(), Some(0));
    }

    #[test]
    fn test_site_search_keeps_carousel_viewer_on_its_item() {
        let mut gallery = loaded(&[
            record("a", "Harbour", "x"),
            record("b", "Sunset", "x"),
            record("c", "Sunrise", "x"),
        ]);
        let group = GroupId::new("x");
        gallery.open_from_carousel(&group, "b", None);
        assert_eq!(gallery.viewer.index(), Some(1));

        // "sun" promotes b and c ahead of a: b moves to the front.
        assert!(gallery.set_site_query("sun").is_empty());
        assert_eq!(gallery.viewer.index(), Some(0));
        let panel = gallery.compute_viewmodel().viewer;
        assert_eq!(panel.map(|p| p.caption.title), Some("Sunset".to_string()));
        assert_eq!(gallery.fragment.as_deref(), Some("b"));

        // "harbour" dims b, so the viewer closes and the fragment is cleared.
        let actions = gallery.set_site_query("harbour");
        assert!(actions.contains(&Action::HideViewer));
        assert!(actions.contains(&Action::ReplaceFragment(None)));
        assert!(!gallery.viewer.is_open());
        assert!(gallery.compute_viewmodel().viewer.is_none());
        assert_eq!(gallery.fragment, None);
    }

    #[test]
    fn test_site_search_leaves_grid_viewer_alone() {
        let mut gallery = loaded(&[record("a", "Harbour", "x"), record("b", "Sunset", "x")]);
        gallery.open_item("b", None);
        assert!(gallery.set_site_query("harbour").is_empty());
        assert_eq!(gallery.viewer.index(), Some(1));
    }

    #[test]
    fn test_filter_chips_ignore_tag_case() {
        let gallery = loaded(&[
            record("a", "A", "Murals"),
            record("b", "B", "murals"),
            record("c", "C", "Sketches"),
        ]);
        let labels: Vec<String> = gallery
            .compute_viewmodel()
            .filters
            .into_iter()
            .map(|chip| chip.label)
            .collect();
        assert_eq!(labels, vec!["all", "murals", "sketches"]);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut gallery = Gallery::new(
            Rc::new(EventBus::new()),
            LazyLoadScheduler::immediate(),
            Theme::default(),
        );
        let older = gallery.begin_load();
        let newer = gallery.begin_load();
        gallery.complete_load(newer, &[record("n", "New", "x")]);
        assert!(gallery.complete_load(older, &[record("o", "Old", "x")]).is_empty());
        assert_eq!(gallery.view.ids(), vec!["n"]);
    }

    #[test]
    fn test_viewer_sync_recentres_carousel() {
        let mut gallery = loaded(&[record("a", "A", "x"), record("b", "B", "x"), record("c", "C", "x")]);
        gallery.open_from_carousel(&GroupId::new("x"), "c", None);
        assert_eq!(gallery.widgets[0].borrow().index(), 2);
        gallery.next();
        assert_eq!(gallery.widgets[0].borrow().index(), 0);
    }
}
