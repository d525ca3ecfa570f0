/*!
 * RAII Resource Guards
 *
 * Scoped ownership of change subscriptions with automatic cleanup.
 *
 * ## Design Principles
 *
 * 1. **Release exactly once**: Explicit release and Drop never both run the cleanup
 * 2. **Traced**: Guards log creation and release through `tracing`
 * 3. **Unwind-safe**: Cleanup still runs when a panic unwinds through the owner
 *
 * ## Example
 *
 * ```ignore
 * let guard = SubscriptionGuard::subscribe(&subject, &key, callback);
 * // Use subscription
 * // Automatically unsubscribed on drop
 * ```
 */

mod subscription;
mod traits;

pub use subscription::SubscriptionGuard;
pub use traits::{Guard, GuardDrop};

use crate::core::types::SubscriptionId;

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur during guard operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum GuardError {
    #[error("Resource already released")]
    AlreadyReleased,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Guard metadata for diagnostics
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub creation_time: std::time::Instant,
    pub subscription: Option<SubscriptionId>,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            creation_time: std::time::Instant::now(),
            subscription: None,
        }
    }

    #[inline]
    pub fn with_subscription(mut self, id: SubscriptionId) -> Self {
        self.subscription = Some(id);
        self
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
