/*!
 * Subscription Guards
 *
 * RAII guards for change subscriptions with automatic unsubscribe
 */

use super::traits::{Guard, GuardDrop};
use super::{GuardError, GuardMetadata, GuardResult};
use crate::core::sync::{ChangeCallback, Observable};
use crate::core::types::SubscriptionId;
use tracing::{debug, trace, warn};

/// Subscription guard with automatic unsubscribe
///
/// # Example
///
/// ```ignore
/// let guard = SubscriptionGuard::subscribe(&subject, &"count", callback);
/// let id = guard.id();
/// // Callback stays registered
/// // Automatically unsubscribed on drop
/// ```
pub struct SubscriptionGuard<'a, S>
where
    S: Observable + ?Sized,
{
    subject: &'a S,
    id: SubscriptionId,
    metadata: GuardMetadata,
    active: bool,
}

impl<'a, S> SubscriptionGuard<'a, S>
where
    S: Observable + ?Sized,
{
    /// Subscribe `callback` on `key` and guard the registration
    pub fn subscribe(subject: &'a S, key: &S::Key, callback: ChangeCallback) -> Self {
        let id = subject.subscribe(key, callback);
        debug!(subscription = %id, key = ?key, "change callback subscribed");

        Self {
            subject,
            id,
            metadata: GuardMetadata::new("subscription").with_subscription(id),
            active: true,
        }
    }

    /// Get the subscription handle
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Unsubscribe before the guard goes out of scope
    pub fn unsubscribe_early(mut self) -> GuardResult<()> {
        self.release()
    }
}

impl<'a, S> Guard for SubscriptionGuard<'a, S>
where
    S: Observable + ?Sized,
{
    fn resource_type(&self) -> &'static str {
        "subscription"
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.active {
            return Err(GuardError::AlreadyReleased);
        }

        self.active = false;
        if !self.subject.unsubscribe(self.id) {
            return Err(GuardError::OperationFailed(format!(
                "subject no longer knows {}",
                self.id
            )));
        }

        trace!(
            subscription = %self.id,
            lifetime_micros = self.metadata.lifetime_micros(),
            "change callback unsubscribed"
        );
        Ok(())
    }
}

impl<'a, S> GuardDrop for SubscriptionGuard<'a, S>
where
    S: Observable + ?Sized,
{
    fn on_drop(&mut self) {
        if self.active {
            if let Err(e) = self.release() {
                warn!(subscription = %self.id, error = %e, "Subscription guard drop failed");
            }
        }
    }
}

impl<'a, S> Drop for SubscriptionGuard<'a, S>
where
    S: Observable + ?Sized,
{
    fn drop(&mut self) {
        self.on_drop();
    }
}
