//! Per-engine publish/subscribe registry.
//!
//! Channels map to handler lists kept in insertion order, so fan-out order
//! is the order handlers subscribed. A [`Subscription`] removes exactly the
//! handler it was issued for; removing the last handler of a channel drops
//! the channel entry.
//!
//! Publishing is re-entrant: a handler may publish, subscribe or
//! unsubscribe while an event is being delivered. Each publish works from a
//! snapshot of the channel's handlers, and a handler unsubscribed mid
//! fan-out is not called again, even by the publish already in progress.

use crate::core::event::{Channel, Event};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type Handler = Box<dyn FnMut(&Event)>;

type SharedHandler = Rc<RefCell<Handler>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    channels: IndexMap<Channel, IndexMap<SubscriptionId, SharedHandler>>,
    next_id: u64,
}

impl Registry {
    fn contains(&self, channel: &Channel, id: SubscriptionId) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|handlers| handlers.contains_key(&id))
    }

    fn remove(&mut self, channel: &Channel, id: SubscriptionId) -> bool {
        let Some(handlers) = self.channels.get_mut(channel) else {
            return false;
        };
        let removed = handlers.shift_remove(&id).is_some();
        if handlers.is_empty() {
            self.channels.shift_remove(channel);
        }
        removed
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[must_use = "dropping a Subscription keeps the handler registered; call unsubscribe to remove it"]
pub struct Subscription {
    channel: Channel,
    id: SubscriptionId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(&self.channel, self.id))
    }

    /// Returns `false` if the handler was already gone (bus cleared or
    /// dropped).
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(&self.channel, self.id),
            None => false,
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .finish()
    }
}

#[derive(Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, channel: Channel, handler: Handler) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry
            .channels
            .entry(channel.clone())
            .or_default()
            .insert(id, Rc::new(RefCell::new(handler)));
        Subscription {
            channel,
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn unsubscribe(&self, channel: &Channel, id: SubscriptionId) -> bool {
        self.registry.borrow_mut().remove(channel, id)
    }

    pub fn publish(&self, event: &Event) {
        let channel = event.channel();
        let snapshot: Vec<(SubscriptionId, SharedHandler)> = match self.registry.borrow().channels.get(&channel) {
            Some(handlers) => handlers
                .iter()
                .map(|(id, handler)| (*id, handler.clone()))
                .collect(),
            None => return,
        };
        tracing::trace!(channel = %channel, subscribers = snapshot.len(), "publish");

        for (id, handler) in snapshot {
            if !self.registry.borrow().contains(&channel, id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (*handler)(event),
                Err(_) => {
                    tracing::warn!(channel = %channel, ?id, "handler already running; skipped re-entrant delivery");
                }
            }
        }
    }

    pub fn handler_count(&self, channel: &Channel) -> usize {
        self.registry
            .borrow()
            .channels
            .get(channel)
            .map_or(0, IndexMap::len)
    }

    pub fn has_channel(&self, channel: &Channel) -> bool {
        self.registry.borrow().channels.contains_key(channel)
    }

    pub fn channel_count(&self) -> usize {
        self.registry.borrow().channels.len()
    }

    pub fn clear(&self) {
        self.registry.borrow_mut().channels.clear();
    }
}
