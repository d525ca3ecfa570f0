/*!
 * Synchronization Primitives
 *
 * Blocking wait on a predicate over an observable subject:
 * - `ConditionWaiter` runs the subscribe-then-check protocol
 * - `Gate` is the one-shot signal a waiter blocks on
 * - `Observable` is the capability a subject must provide
 * - `PropertyNotifier` is a ready-made `Observable` for embedding in subjects
 *
 * # Architecture
 *
 * The waiter never polls the predicate. It re-evaluates only on change
 * notifications and blocks on the gate in bounded slices so an interrupt
 * flag is observed promptly.
 */

mod condition;
mod config;
mod gate;
mod interrupt;
mod notifier;
mod traits;

pub use condition::{try_wait_for_condition, wait_for_condition, ConditionWaiter};
pub use config::WaitConfig;
pub use gate::{Gate, GateState};
pub use interrupt::InterruptFlag;
pub use notifier::PropertyNotifier;
pub use traits::{ChangeCallback, Observable};
