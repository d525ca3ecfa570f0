/*!
 * Observable Wait Library
 * Block a thread until a predicate over an observable subject holds
 */

pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{WaitError, WaitResult};
pub use crate::core::sync::{
    try_wait_for_condition, wait_for_condition, ChangeCallback, ConditionWaiter, Gate, GateState,
    InterruptFlag, Observable, PropertyNotifier, WaitConfig,
};
pub use crate::core::types::{SubscriptionId, WaitOutcome};
pub use monitoring::{init_tracing, span_wait};
