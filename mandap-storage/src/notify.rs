//! Change notification for collection writes.
//!
//! Observers register a callback for one collection key (or for all keys)
//! and receive a `ChangeEvent` after every write to it. Delivery is
//! synchronous, on the writer's thread, in subscription order.

use mandap_core::CollectionKey;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// Payload delivered after a collection write.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub key: CollectionKey,
    /// The full collection as written.
    pub value: serde_json::Value,
}

/// Observer callback.
pub type ChangeCallback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

struct Listener {
    id: u64,
    key: Option<CollectionKey>,
    callback: ChangeCallback,
}

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    listeners: RwLock<Vec<Listener>>,
}

impl Registry {
    // A panicking observer must not disable notifications for everyone else.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Listener>> {
        self.listeners.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Listener>> {
        self.listeners.write().unwrap_or_else(|p| p.into_inner())
    }

    fn remove(&self, id: u64) -> bool {
        let mut listeners = self.write();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }
}

/// Registry of change observers. Clones share the same registry.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    registry: Arc<Registry>,
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe writes to one collection.
    pub fn subscribe<F>(&self, key: CollectionKey, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.register(Some(key), Arc::new(callback))
    }

    /// Observe writes to every collection.
    pub fn subscribe_all<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(callback))
    }

    fn register(&self, key: Option<CollectionKey>, callback: ChangeCallback) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry.write().push(Listener { id, key, callback });
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every matching observer.
    ///
    /// Callbacks run after the registry lock is released, so an observer may
    /// read from the store or (un)subscribe while being notified.
    pub fn notify(&self, event: &ChangeEvent) {
        let targets: Vec<ChangeCallback> = self
            .registry
            .read()
            .iter()
            .filter(|l| l.key.map_or(true, |k| k == event.key))
            .map(|l| Arc::clone(&l.callback))
            .collect();

        for callback in targets {
            callback(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.read().len()
    }
}

/// Handle for removing an observer.
///
/// Dropping the handle leaves the observer registered.
#[must_use = "keep the Subscription to be able to unsubscribe"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Remove the observer. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove(self.id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn event(key: CollectionKey) -> ChangeEvent {
        ChangeEvent {
            key,
            value: json!([]),
        }
    }

    #[test]
    fn test_keyed_subscription_filters() {
        let notifier = ChangeNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = notifier.subscribe(CollectionKey::Guests, move |e| {
            sink.lock().unwrap().push(e.key);
        });

        notifier.notify(&event(CollectionKey::Bookings));
        notifier.notify(&event(CollectionKey::Guests));

        assert_eq!(*seen.lock().unwrap(), vec![CollectionKey::Guests]);
    }

    #[test]
    fn test_subscribe_all_receives_everything_in_order() {
        let notifier = ChangeNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        let _a = notifier.subscribe_all(move |_| first.lock().unwrap().push("first"));
        let second = Arc::clone(&seen);
        let _b = notifier.subscribe_all(move |_| second.lock().unwrap().push("second"));

        notifier.notify(&event(CollectionKey::Assignments));
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let notifier = ChangeNotifier::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let sub = notifier.subscribe_all(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        notifier.notify(&event(CollectionKey::Bookings));
        assert!(sub.unsubscribe());
        notifier.notify(&event(CollectionKey::Bookings));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_after_notifier_dropped() {
        let notifier = ChangeNotifier::new();
        let sub = notifier.subscribe_all(|_| {});
        drop(notifier);
        assert!(!sub.unsubscribe());
    }

    #[test]
    fn test_callback_may_subscribe_during_notify() {
        let notifier = ChangeNotifier::new();
        let inner = notifier.clone();
        let _sub = notifier.subscribe_all(move |_| {
            let _nested = inner.subscribe_all(|_| {});
        });

        notifier.notify(&event(CollectionKey::Guests));
        assert_eq!(notifier.listener_count(), 2);
    }
}
