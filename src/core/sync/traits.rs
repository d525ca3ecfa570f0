/*!
 * Observation Traits
 *
 * The single capability the condition waiter needs from a subject:
 * subscribe and unsubscribe a callback on a named property.
 */

use crate::core::types::SubscriptionId;
use std::fmt::Debug;
use std::sync::Arc;

/// Callback invoked synchronously on the thread that performs a change
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Subject that publishes change notifications per property
///
/// Implementations must be:
/// - **Thread-safe**: `subscribe`/`unsubscribe` may race with notifications
/// - **Synchronous**: callbacks run on the notifying thread
///
/// The notification order and multi-listener semantics are left to the
/// implementation.
pub trait Observable: Send + Sync {
    /// Property identifier accepted for subscription
    type Key: Clone + Debug + Send + Sync + 'static;

    /// Register `callback` to run whenever `key` changes
    fn subscribe(&self, key: &Self::Key, callback: ChangeCallback) -> SubscriptionId;

    /// Remove a callback registered by `subscribe`
    ///
    /// Returns `true` if a callback was removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Number of callbacks currently registered on `key`
    ///
    /// May be stale by the time it returns; meant for diagnostics and tests.
    fn subscriber_count(&self, key: &Self::Key) -> usize;
}

impl<T> Observable for Arc<T>
where
    T: Observable + ?Sized,
{
    type Key = T::Key;

    #[inline]
    fn subscribe(&self, key: &Self::Key, callback: ChangeCallback) -> SubscriptionId {
        (**self).subscribe(key, callback)
    }

    #[inline]
    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        (**self).unsubscribe(id)
    }

    #[inline]
    fn subscriber_count(&self, key: &Self::Key) -> usize {
        (**self).subscriber_count(key)
    }
}
