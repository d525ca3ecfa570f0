/*!
 * Property Notifier
 *
 * Reference `Observable`: a thread-safe listener registry keyed by
 * property. Subjects embed one and call `notify` after each mutation.
 *
 * # Design: Snapshot Before Dispatch
 *
 * `notify` clones the callback list out of the map and releases the shard
 * lock before invoking anything, so a callback may subscribe or unsubscribe
 * on the same notifier without deadlocking.
 */

use super::traits::{ChangeCallback, Observable};
use crate::core::types::SubscriptionId;
use ahash::RandomState;
use dashmap::DashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Listener registry keyed by property
pub struct PropertyNotifier<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    listeners: DashMap<K, Vec<(SubscriptionId, ChangeCallback)>, RandomState>,
    /// Reverse index so `unsubscribe` only needs the handle
    index: DashMap<SubscriptionId, K, RandomState>,
    next_id: AtomicU64,
}

impl<K> PropertyNotifier<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            listeners: DashMap::with_hasher(RandomState::new()),
            index: DashMap::with_hasher(RandomState::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Invoke every callback registered on `key`
    ///
    /// Runs synchronously on the calling thread. Returns the number of
    /// callbacks invoked.
    pub fn notify(&self, key: &K) -> usize {
        let callbacks: Vec<ChangeCallback> = match self.listeners.get(key) {
            Some(entry) => entry.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            None => return 0,
        };

        for callback in &callbacks {
            callback();
        }

        trace!(key = ?key, listeners = callbacks.len(), "property change dispatched");
        callbacks.len()
    }

    /// Number of callbacks registered on `key`
    pub fn subscriber_count(&self, key: &K) -> usize {
        self.listeners.get(key).map_or(0, |entry| entry.len())
    }

    /// Number of callbacks registered across all keys
    pub fn total_subscribers(&self) -> usize {
        self.index.len()
    }
}

impl<K> Default for PropertyNotifier<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Observable for PropertyNotifier<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    type Key = K;

    fn subscribe(&self, key: &K, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.index.insert(id, key.clone());
        self.listeners
            .entry(key.clone())
            .or_default()
            .push((id, callback));

        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Some((_, key)) = self.index.remove(&id) else {
            return false;
        };

        if let Some(mut entry) = self.listeners.get_mut(&key) {
            entry.retain(|(registered, _)| *registered != id);
        }
        // Drop empty lists so idle keys do not accumulate
        self.listeners.remove_if(&key, |_, callbacks| callbacks.is_empty());

        true
    }

    fn subscriber_count(&self, key: &K) -> usize {
        PropertyNotifier::subscriber_count(self, key)
    }
}
