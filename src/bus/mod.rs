//! Synchronous publish/subscribe channel between widgets, search and viewer.
//!
//! The bus keeps independently rendered carousels consistent without a central
//! render loop. It has no state beyond its subscriber set.
//!
//! # Delivery
//!
//! - **Synchronous**: [`EventBus::publish`] returns only after every current
//!   subscriber has processed the message
//! - **Ordered**: subscribers run in subscription order
//! - **Contained**: a subscriber returning an error is logged and skipped;
//!   delivery continues to the rest
//!
//! Publishers must finish mutating shared sequences before publishing. Handlers
//! may subscribe, unsubscribe or publish re-entrantly; such changes take effect
//! for the next delivery.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use vitrine::bus::{BusMessage, EventBus, GroupId};
//!
//! let bus = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! bus.subscribe(move |_msg| {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! });
//! bus.publish(&BusMessage::reorder(GroupId::new("murals"), false));
//! assert_eq!(seen.get(), 1);
//! ```

pub mod messages;

pub use messages::{BusMessage, GroupId};

use crate::domain::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&BusMessage) -> Result<()>>;

/// Outcome of one publish call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

/// Process-wide, single-threaded event bus.
///
/// Shared as `Rc<EventBus>` between the gallery context and its widgets.
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<(SubscriptionId, Handler)>>,
    next_id: Cell<u64>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every subsequent message.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&BusMessage) -> Result<()> + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(handler)));
        tracing::trace!(subscription = id.0, "bus subscriber added");
        id
    }

    /// Removes a handler. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        before != subscribers.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Delivers `message` to every current subscriber, in order.
    pub fn publish(&self, message: &BusMessage) -> Delivery {
        let _span = tracing::debug_span!("bus_publish", message = ?message).entered();

        // Snapshot so handlers can touch the subscriber list while we deliver.
        let handlers: Vec<(SubscriptionId, Handler)> = self.subscribers.borrow().clone();

        let mut delivery = Delivery::default();
        for (id, handler) in handlers {
            match handler(message) {
                Ok(()) => delivery.delivered += 1,
                Err(e) => {
                    delivery.failed += 1;
                    tracing::warn!(subscription = id.0, error = %e, "bus subscriber failed");
                }
            }
        }

        tracing::debug!(delivered = delivery.delivered, failed = delivery.failed, "message delivered");
        delivery
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GalleryError;

    fn reorder() -> BusMessage {
        BusMessage::reorder(GroupId::new("g"), false)
    }

    #[test]
    fn test_failing_subscriber_does_not_block_others() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        bus.subscribe(move |_| {
            first.borrow_mut().push("first");
            Ok(())
        });
        bus.subscribe(|_| Err(GalleryError::Subscriber("boom".into())));
        let third = Rc::clone(&log);
        bus.subscribe(move |_| {
            third.borrow_mut().push("third");
            Ok(())
        });

        let delivery = bus.publish(&reorder());
        assert_eq!(delivery, Delivery { delivered: 2, failed: 1 });
        assert_eq!(*log.borrow(), vec!["first", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let id = bus.subscribe(|_| Ok(()));
        assert_eq!(bus.subscriber_count(), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.publish(&reorder()).delivered, 0);
    }

    #[test]
    fn test_reentrant_subscribe_during_delivery() {
        let bus = Rc::new(EventBus::new());
        let inner = Rc::clone(&bus);
        bus.subscribe(move |_| {
            inner.subscribe(|_| Ok(()));
            Ok(())
        });

        assert_eq!(bus.publish(&reorder()).delivered, 1);
        assert_eq!(bus.subscriber_count(), 2);
    }
}
