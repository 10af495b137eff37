//! Per-collection carousel groups and the site search that reorders them.

use crate::bus::{BusMessage, EventBus, GroupId};
use crate::domain::Item;
use crate::filter::{promote_matches, FilteredView, Promotion, Query, SearchStats};
use std::cell::RefCell;
use std::rc::Rc;

/// Item order of one group as currently laid out, shared with its widgets.
///
/// The deck is the only writer. Widgets re-read it when a reorder arrives.
pub type SharedTrack = Rc<RefCell<Promotion>>;

#[derive(Debug)]
struct CarouselGroup {
    id: GroupId,
    base: Vec<Rc<Item>>,
    track: SharedTrack,
}

/// Every carousel group of the gallery, one per collection in store order.
#[derive(Debug)]
pub struct CarouselDeck {
    groups: Vec<CarouselGroup>,
    query: Query,
    bus: Rc<EventBus>,
}

impl CarouselDeck {
    /// Builds one group per distinct collection, in first-appearance order.
    #[must_use]
    pub fn new(items: &[Rc<Item>], bus: Rc<EventBus>) -> Self {
        let mut collections: Vec<(GroupId, Vec<Rc<Item>>)> = Vec::new();
        for item in items {
            match collections.iter_mut().find(|(id, _)| id.as_str() == item.collection) {
                Some((_, base)) => base.push(Rc::clone(item)),
                None => collections.push((GroupId::new(item.collection.clone()), vec![Rc::clone(item)])),
            }
        }

        let groups: Vec<CarouselGroup> = collections
            .into_iter()
            .map(|(id, base)| {
                let track = Rc::new(RefCell::new(Promotion {
                    order: base.clone(),
                    matched: base.len(),
                }));
                CarouselGroup { id, base, track }
            })
            .collect();

        tracing::debug!(groups = groups.len(), "carousel deck built");
        Self {
            groups,
            query: Query::default(),
            bus,
        }
    }

    /// Group identifiers in display order.
    #[must_use]
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.iter().map(|g| g.id.clone()).collect()
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Track shared with widgets of `group`.
    #[must_use]
    pub fn track(&self, group: &GroupId) -> Option<SharedTrack> {
        self.find(group).map(|g| Rc::clone(&g.track))
    }

    /// The group's non-dimmed items in track order: the viewer's navigation
    /// sequence when opened from this carousel.
    #[must_use]
    pub fn visible(&self, group: &GroupId) -> FilteredView {
        self.find(group).map_or_else(FilteredView::default, |g| {
            let track = g.track.borrow();
            FilteredView::new(track.order[..track.matched].to_vec())
        })
    }

    /// Whether `item_id` is dimmed by the active search in `group`.
    #[must_use]
    pub fn is_dimmed(&self, group: &GroupId, item_id: &str) -> bool {
        self.find(group).is_some_and(|g| {
            let track = g.track.borrow();
            track
                .order
                .iter()
                .position(|item| item.id == item_id)
                .is_some_and(|position| track.is_dimmed(position))
        })
    }

    /// First matching item across all groups, in display order.
    #[must_use]
    pub fn first_match(&self) -> Option<(GroupId, Rc<Item>)> {
        self.groups.iter().find_map(|g| {
            let track = g.track.borrow();
            (track.matched > 0).then(|| (g.id.clone(), Rc::clone(&track.order[0])))
        })
    }

    /// Runs a site search: promotes matches within each group, dims the rest,
    /// and announces every group's new order on the bus.
    ///
    /// Widgets snap back to their first slide when their group's order changed.
    pub fn search(&mut self, query: Query) -> SearchStats {
        let _span = tracing::debug_span!("carousel_search", terms = query.terms().len()).entered();

        let mut matches = 0;
        let mut announcements = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let promotion = promote_matches(&group.base, &query);
            matches += promotion.matched;

            let order_changed = {
                let current = group.track.borrow();
                !current
                    .order
                    .iter()
                    .map(|item| &item.id)
                    .eq(promotion.order.iter().map(|item| &item.id))
            };
            *group.track.borrow_mut() = promotion;
            announcements.push(BusMessage::reorder(group.id.clone(), order_changed));
        }
        self.query = query;

        // Every track is final before the first widget hears about it.
        for message in &announcements {
            self.bus.publish(message);
        }

        let stats = SearchStats {
            matches,
            active: !self.query.is_empty(),
        };
        tracing::debug!(matches, "site search applied");
        stats
    }

    fn find(&self, group: &GroupId) -> Option<&CarouselGroup> {
        self.groups.iter().find(|g| &g.id == group)
    }
}
