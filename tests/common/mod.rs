/*!
 * Shared test subjects
 */

#![allow(dead_code)]

use observable_wait::{ChangeCallback, Observable, PropertyNotifier, SubscriptionId};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Observable counter with a `count` property
#[derive(Default)]
pub struct Counter {
    count: AtomicI64,
    notifier: PropertyNotifier<&'static str>,
    subscribes: AtomicUsize,
    unsubscribes: AtomicUsize,
}

impl Counter {
    pub fn starting_at(count: i64) -> Arc<Self> {
        let counter = Self::default();
        counter.count.store(count, Ordering::SeqCst);
        Arc::new(counter)
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.notifier.notify(&"count");
    }

    pub fn set(&self, value: i64) {
        self.count.store(value, Ordering::SeqCst);
        self.notifier.notify(&"count");
    }

    /// Mutate without announcing the change
    pub fn set_silently(&self, value: i64) {
        self.count.store(value, Ordering::SeqCst);
    }

    pub fn active_subscriptions(&self) -> usize {
        self.notifier.subscriber_count(&"count")
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribes.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }
}

impl Observable for Counter {
    type Key = &'static str;

    fn subscribe(&self, key: &Self::Key, callback: ChangeCallback) -> SubscriptionId {
        self.subscribes.fetch_add(1, Ordering::SeqCst);
        self.notifier.subscribe(key, callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.unsubscribes.fetch_add(1, Ordering::SeqCst);
        self.notifier.unsubscribe(id)
    }

    fn subscriber_count(&self, key: &Self::Key) -> usize {
        self.notifier.subscriber_count(key)
    }
}
