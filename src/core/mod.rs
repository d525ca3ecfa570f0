/*!
 * Core Module
 * Wait primitive, error handling, and resource guards
 */

pub mod errors;
pub mod guard;
pub mod limits;
pub mod sync;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use guard::{Guard, GuardDrop, GuardError, GuardMetadata, GuardResult, SubscriptionGuard};
pub use types::*;
