use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::event::UiEvent;
use super::toolkit::ElementId;

static NEXT_SUBSCRIBER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one listener owner, e.g. one popup controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub fn next() -> Self {
        Self(NEXT_SUBSCRIBER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
    /// Every pointer press on screen, regardless of target.
    GlobalPress,
    /// Focus transitions of one top-level element.
    Focus(ElementId),
    /// Containment changes affecting one element.
    Containment(ElementId),
}

impl Interest {
    pub fn matches(self, event: &UiEvent) -> bool {
        match (self, event) {
            (Self::GlobalPress, UiEvent::Press { .. }) => true,
            (Self::Focus(watched), UiEvent::FocusGained { target })
            | (Self::Focus(watched), UiEvent::FocusLost { target, .. }) => watched == *target,
            (Self::Containment(watched), UiEvent::Containment { element, .. }) => {
                watched == *element
            }
            _ => false,
        }
    }
}

/// One routed event, addressed to the listener that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub subscriber: SubscriberId,
    pub listener: ListenerId,
    pub event: UiEvent,
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    subscriber: SubscriberId,
    interest: Interest,
}

/// Process-wide listener table, keyed by listener handle and filtered per
/// subscriber. Every `register` is paired with exactly one `unregister`.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_listener: u64,
    entries: BTreeMap<ListenerId, Registration>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, subscriber: SubscriberId, interest: Interest) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.entries.insert(
            id,
            Registration {
                subscriber,
                interest,
            },
        );
        tracing::trace!(?subscriber, ?interest, listener = ?id, "listener registered");
        id
    }

    pub fn unregister(&mut self, listener: ListenerId) -> bool {
        let removed = self.entries.remove(&listener).is_some();
        if !removed {
            tracing::warn!(?listener, "unregister requested for unknown listener");
        }
        removed
    }

    pub fn is_registered(&self, listener: ListenerId) -> bool {
        self.entries.contains_key(&listener)
    }

    pub fn count_for(&self, subscriber: SubscriberId) -> usize {
        self.entries
            .values()
            .filter(|registration| registration.subscriber == subscriber)
            .count()
    }

    pub fn interests_for(&self, subscriber: SubscriberId) -> Vec<Interest> {
        self.entries
            .values()
            .filter(|registration| registration.subscriber == subscriber)
            .map(|registration| registration.interest)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliveries for `event`, in registration order.
    pub fn route(&self, event: &UiEvent) -> Vec<Delivery> {
        self.entries
            .iter()
            .filter(|(_, registration)| registration.interest.matches(event))
            .map(|(listener, registration)| Delivery {
                subscriber: registration.subscriber,
                listener: *listener,
                event: *event,
            })
            .collect()
    }
}
