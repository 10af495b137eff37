//! A single carousel widget: local position, edge state and track layout.

use super::deck::SharedTrack;
use crate::bus::{BusMessage, EventBus, GroupId, SubscriptionId};
use crate::domain::{GalleryError, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Gap between slides when the host reports none.
pub const DEFAULT_GAP: f64 = 30.0;

/// Measured geometry of a carousel track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub slide_width: f64,
    pub gap: f64,
    pub container_width: f64,
}

impl TrackGeometry {
    #[must_use]
    pub const fn new(slide_width: f64, container_width: f64) -> Self {
        Self {
            slide_width,
            gap: DEFAULT_GAP,
            container_width,
        }
    }

    #[must_use]
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }
}

/// Layout state of one rendered slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideState {
    pub item_id: String,
    pub title: String,
    pub centered: bool,
    pub dimmed: bool,
}

/// Widget showing one group's track with a centred slide.
///
/// The index is always clamped to the track; stepping stops at the ends.
#[derive(Debug)]
pub struct CarouselWidget {
    group: GroupId,
    track: SharedTrack,
    ids: Vec<String>,
    index: usize,
    subscription: Option<SubscriptionId>,
}

impl CarouselWidget {
    #[must_use]
    pub fn new(group: GroupId, track: SharedTrack) -> Self {
        let mut widget = Self {
            group,
            track,
            ids: Vec::new(),
            index: 0,
            subscription: None,
        };
        widget.refresh();
        widget
    }

    /// Creates a widget and subscribes it to `bus` for its group's messages.
    ///
    /// The subscription holds only a weak reference; dropping the returned
    /// widget turns its handler into a no-op.
    pub fn attach(group: GroupId, track: SharedTrack, bus: &EventBus) -> Rc<RefCell<Self>> {
        let widget = Rc::new(RefCell::new(Self::new(group, track)));
        let weak: Weak<RefCell<Self>> = Rc::downgrade(&widget);

        let id = bus.subscribe(move |message| {
            let Some(widget) = weak.upgrade() else {
                return Ok(());
            };
            let mut widget = widget
                .try_borrow_mut()
                .map_err(|e| GalleryError::Subscriber(format!("carousel widget busy: {e}")))?;
            widget.on_message(message);
            Ok(())
        });
        widget.borrow_mut().subscription = Some(id);
        widget
    }

    /// Unsubscribes from `bus`.
    pub fn detach(&mut self, bus: &EventBus) {
        if let Some(id) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    #[must_use]
    pub const fn group(&self) -> &GroupId {
        &self.group
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifier of the centred slide.
    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.ids.get(self.index).map(String::as_str)
    }

    /// Applies a bus message addressed to any group; others' messages are ignored.
    pub fn on_message(&mut self, message: &BusMessage) {
        if message.group() != &self.group {
            return;
        }
        match message {
            BusMessage::Reorder { reset_to_start, .. } => {
                if *reset_to_start {
                    self.index = 0;
                }
                self.refresh();
            }
            BusMessage::PositionSync { index, item_id, .. } => {
                self.refresh();
                self.index = item_id
                    .as_deref()
                    .and_then(|id| self.ids.iter().position(|known| known == id))
                    .unwrap_or(*index);
                self.clamp();
            }
        }
        tracing::trace!(group = %self.group, index = self.index, "carousel updated");
    }

    /// Moves one slide left (`-1`) or right (`+1`). Returns whether the index moved.
    pub fn step(&mut self, delta: isize) -> bool {
        let before = self.index;
        self.index = match delta.signum() {
            -1 => self.index.saturating_sub(1),
            1 if self.index + 1 < self.ids.len() => self.index + 1,
            _ => self.index,
        };
        before != self.index
    }

    /// `(left disabled, right disabled)` for the edge buttons.
    #[must_use]
    pub fn edges_disabled(&self) -> (bool, bool) {
        (self.index == 0, self.index + 1 >= self.ids.len())
    }

    /// Horizontal track translation, in pixels, that centres the current slide.
    #[must_use]
    pub fn translate_x(&self, geometry: TrackGeometry) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let offset = self.index as f64 * (geometry.slide_width + geometry.gap);
        -offset + geometry.container_width / 2.0 - geometry.slide_width / 2.0
    }

    /// Per-slide layout flags in track order.
    #[must_use]
    pub fn slides(&self) -> Vec<SlideState> {
        let track = self.track.borrow();
        track
            .order
            .iter()
            .enumerate()
            .map(|(position, item)| SlideState {
                item_id: item.id.clone(),
                title: item.title.clone(),
                centered: position == self.index,
                dimmed: track.is_dimmed(position),
            })
            .collect()
    }

    fn refresh(&mut self) {
        self.ids = self.track.borrow().order.iter().map(|item| item.id.clone()).collect();
        self.clamp();
    }

    fn clamp(&mut self) {
        self.index = self.index.min(self.ids.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use crate::filter::Promotion;

    fn track(ids: &[&str]) -> SharedTrack {
        let order: Vec<Rc<Item>> = ids
            .iter()
            .map(|id| {
                Rc::new(Item {
                    id: (*id).into(),
                    thumb_url: String::new(),
                    full_url: String::new(),
                    title: String::new(),
                    description: String::new(),
                    date: String::new(),
                    collection: "g".into(),
                })
            })
            .collect();
        let matched = order.len();
        Rc::new(RefCell::new(Promotion { order, matched }))
    }

    #[test]
    fn test_step_clamps_without_wrapping() {
        let mut widget = CarouselWidget::new(GroupId::new("g"), track(&["a", "b"]));
        assert_eq!(widget.edges_disabled(), (true, false));
        assert!(!widget.step(-1));
        assert!(widget.step(1));
        assert!(!widget.step(1));
        assert_eq!(widget.index(), 1);
        assert_eq!(widget.edges_disabled(), (false, true));
    }

    #[test]
    fn test_translate_centres_current_slide() {
        let mut widget = CarouselWidget::new(GroupId::new("g"), track(&["a", "b", "c"]));
        let geometry = TrackGeometry::new(200.0, 1000.0);
        assert!((widget.translate_x(geometry) - 400.0).abs() < f64::EPSILON);
        widget.step(1);
        assert!((widget.translate_x(geometry) - 170.0).abs() < f64::EPSILON);
        assert!((widget.translate_x(geometry.with_gap(0.0)) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_sync_locates_item_in_own_track() {
        let bus = EventBus::new();
        let widget = CarouselWidget::attach(GroupId::new("g"), track(&["a", "b", "c"]), &bus);

        bus.publish(&BusMessage::position_sync(GroupId::new("g"), 0, Some("c".into())));
        assert_eq!(widget.borrow().index(), 2);

        bus.publish(&BusMessage::position_sync(GroupId::new("g"), 9, None));
        assert_eq!(widget.borrow().index(), 2);

        bus.publish(&BusMessage::position_sync(GroupId::new("other"), 0, Some("a".into())));
        assert_eq!(widget.borrow().current_id(), Some("c"));
    }

    #[test]
    fn test_reorder_rereads_track() {
        let bus = EventBus::new();
        let shared = track(&["a", "b", "c"]);
        let widget = CarouselWidget::attach(GroupId::new("g"), Rc::clone(&shared), &bus);
        widget.borrow_mut().step(1);
        widget.borrow_mut().step(1);

        shared.borrow_mut().order.truncate(2);
        bus.publish(&BusMessage::reorder(GroupId::new("g"), false));
        assert_eq!(widget.borrow().index(), 1);

        bus.publish(&BusMessage::reorder(GroupId::new("g"), true));
        assert_eq!(widget.borrow().index(), 0);
    }

    #[test]
    fn test_dropped_widget_handler_is_inert() {
        let bus = EventBus::new();
        let widget = CarouselWidget::attach(GroupId::new("g"), track(&["a"]), &bus);
        drop(widget);
        let delivery = bus.publish(&BusMessage::reorder(GroupId::new("g"), true));
        assert_eq!(delivery.failed, 0);
    }

    #[test]
    fn test_detach_unsubscribes() {
        let bus = EventBus::new();
        let widget = CarouselWidget::attach(GroupId::new("g"), track(&["a"]), &bus);
        widget.borrow_mut().detach(&bus);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
