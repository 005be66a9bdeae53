//! Event dispatch between components
//!
//! `EventManager` is a registry of `topic -> subscribers`. It is created
//! once (inside the `AppContext`) and cloned into every component that
//! needs it; clones share the same registry.
//!
//! Delivery is synchronous: `broadcast` calls every handler registered for
//! the topic at the moment of the call, on the caller's thread, before it
//! returns. Handlers run outside the registry lock, so a handler may
//! subscribe or unsubscribe without deadlocking.

use dashmap::DashMap;
use larder_core::Entity;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

// ============================================================================
// Event
// ============================================================================

/// A named signal with a free-form content marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Topic, e.g. `reviewListModification`
    pub name: String,
    /// Marker such as `OK`; carries no contract beyond being a string
    pub content: String,
}

impl Event {
    /// Create an event
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The list-modification event for entity type `E`
    pub fn list_modified<E: Entity>(content: impl Into<String>) -> Self {
        Self::new(E::resource().list_modification_topic(), content)
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// Handle returned by `subscribe`; pass it to `destroy` to stop delivery
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: Uuid,
    topic: String,
}

impl Subscription {
    /// Topic this subscription listens on
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Callback invoked for each delivered event
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

// ============================================================================
// EventManager
// ============================================================================

/// Process-wide typed event dispatch
#[derive(Clone, Default)]
pub struct EventManager {
    topics: Arc<DashMap<String, Vec<(Uuid, EventHandler)>>>,
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventManager")
            .field("topics", &self.topics.len())
            .finish()
    }
}

impl EventManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`
    pub fn subscribe<F>(&self, topic: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let topic = topic.into();
        let id = Uuid::new_v4();
        self.topics
            .entry(topic.clone())
            .or_default()
            .push((id, Arc::new(handler)));
        debug!("Subscribed {} to '{}'", id, topic);
        Subscription { id, topic }
    }

    /// Register `handler` for entity type `E`'s list-modification topic
    pub fn subscribe_list_modified<E, F>(&self, handler: F) -> Subscription
    where
        E: Entity,
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.subscribe(E::resource().list_modification_topic(), handler)
    }

    /// Remove a subscription; returns false if it was already gone
    pub fn destroy(&self, subscription: &Subscription) -> bool {
        let mut removed = false;
        if let Some(mut handlers) = self.topics.get_mut(&subscription.topic) {
            let before = handlers.len();
            handlers.retain(|(id, _)| *id != subscription.id);
            removed = handlers.len() != before;
        }
        self.topics
            .remove_if(&subscription.topic, |_, handlers| handlers.is_empty());
        if removed {
            debug!("Unsubscribed {} from '{}'", subscription.id, subscription.topic);
        }
        removed
    }

    /// Deliver `event` to every current subscriber of its topic
    ///
    /// Returns the number of handlers called.
    pub fn broadcast(&self, event: Event) -> usize {
        let handlers: Vec<EventHandler> = self
            .topics
            .get(&event.name)
            .map(|entry| entry.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        debug!(
            "Broadcasting '{}' ({}) to {} subscriber(s)",
            event.name,
            event.content,
            handlers.len()
        );
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Number of subscribers on `topic`
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map(|h| h.len()).unwrap_or(0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use larder_model::Review;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_broadcast_reaches_topic_subscribers_only() {
        let events = EventManager::new();
        let reviews = Arc::new(AtomicUsize::new(0));
        let posts = Arc::new(AtomicUsize::new(0));

        let r = Arc::clone(&reviews);
        events.subscribe("reviewListModification", move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });
        let p = Arc::clone(&posts);
        events.subscribe("postListModification", move |_| {
            p.fetch_add(1, Ordering::SeqCst);
        });

        let delivered = events.broadcast(Event::new("reviewListModification", "OK"));
        assert_eq!(delivered, 1);
        assert_eq!(reviews.load(Ordering::SeqCst), 1);
        assert_eq!(posts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_receives_event_content() {
        let events = EventManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        events.subscribe_list_modified::<Review, _>(move |event| {
            s.lock().unwrap().push(event.content.clone());
        });

        events.broadcast(Event::list_modified::<Review>("OK"));
        assert_eq!(*seen.lock().unwrap(), vec!["OK".to_string()]);
    }

    #[test]
    fn test_destroy_stops_delivery() {
        let events = EventManager::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let sub = events.subscribe("ingredientListModification", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        events.broadcast(Event::new("ingredientListModification", "OK"));
        assert!(events.destroy(&sub));
        assert!(!events.destroy(&sub));
        assert_eq!(events.broadcast(Event::new("ingredientListModification", "OK")), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(events.subscriber_count("ingredientListModification"), 0);
    }

    #[test]
    fn test_broadcast_without_subscribers() {
        let events = EventManager::new();
        assert_eq!(events.broadcast(Event::new("nobodyListening", "OK")), 0);
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let events = EventManager::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let count = Arc::new(AtomicUsize::new(0));

        let inner_events = events.clone();
        let inner_slot = Arc::clone(&slot);
        let c = Arc::clone(&count);
        let sub = events.subscribe("once", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            if let Some(sub) = inner_slot.lock().unwrap().take() {
                inner_events.destroy(&sub);
            }
        });
        *slot.lock().unwrap() = Some(sub);

        events.broadcast(Event::new("once", "OK"));
        events.broadcast(Event::new("once", "OK"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_registry() {
        let events = EventManager::new();
        let clone = events.clone();
        clone.subscribe("shared", |_| {});
        assert_eq!(events.subscriber_count("shared"), 1);
    }
}
