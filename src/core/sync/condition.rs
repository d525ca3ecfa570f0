/*!
 * Condition Waiter
 *
 * Block the calling thread until a predicate over an observable subject
 * holds, re-evaluating the predicate whenever a watched property changes.
 *
 * # Protocol
 *
 * 1. A fresh `Gate` is created for the call.
 * 2. A callback that re-checks the predicate and opens the gate is
 *    subscribed on `(subject, key)`.
 * 3. Only then is the predicate checked on the waiting thread. A change
 *    racing with this check is caught either by the check itself or by the
 *    already-registered callback, so no wakeup is lost.
 * 4. The waiter blocks on the gate in poll slices, re-checking the
 *    interrupt flag and the deadline between slices.
 * 5. The `SubscriptionGuard` unsubscribes on every exit path, including
 *    errors and panics.
 */

use super::config::WaitConfig;
use super::gate::{Gate, GateState};
use super::traits::{ChangeCallback, Observable};
use crate::core::errors::{WaitError, WaitResult};
use crate::core::guard::SubscriptionGuard;
use crate::core::types::WaitOutcome;
use crate::monitoring::span_wait;
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Blocking predicate waiter
///
/// Stateless apart from its configuration; one waiter can serve any number
/// of concurrent `wait` calls.
///
/// # Examples
///
/// ```
/// use observable_wait::{ConditionWaiter, PropertyNotifier, WaitConfig};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let subject = Arc::new(PropertyNotifier::<&'static str>::new());
/// let waiter = ConditionWaiter::new(WaitConfig::responsive());
///
/// // Already true: returns without blocking
/// waiter.wait(|_| true, &subject, &"count", None).unwrap();
///
/// // Never true: fails once the timeout elapses
/// let result = waiter.wait(|_| false, &subject, &"count", Some(Duration::from_millis(20)));
/// assert!(result.unwrap_err().is_timeout());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionWaiter {
    config: WaitConfig,
}

impl ConditionWaiter {
    pub fn new(config: WaitConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration (50ms poll slice, no interrupt flag)
    pub fn with_defaults() -> Self {
        Self::default()
    }

    #[inline]
    pub fn config(&self) -> &WaitConfig {
        &self.config
    }

    /// Wait until `predicate(subject)` holds
    ///
    /// The predicate is evaluated once up front and again on every change
    /// notification for `key`. With `timeout == None` the call only returns
    /// once satisfied or interrupted.
    ///
    /// # Errors
    ///
    /// - `WaitError::Timeout` if a finite timeout elapses first
    /// - `WaitError::Interrupted` if the configured interrupt flag is raised
    pub fn wait<S, P>(
        &self,
        predicate: P,
        subject: &Arc<S>,
        key: &S::Key,
        timeout: Option<Duration>,
    ) -> WaitResult<()>
    where
        S: Observable + 'static,
        P: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.wait_outcome(predicate, subject, key, timeout)?
            .into_result(timeout.unwrap_or_default())
    }

    /// Like `wait`, but reports a timeout as `WaitOutcome::TimedOut`
    pub fn wait_outcome<S, P>(
        &self,
        predicate: P,
        subject: &Arc<S>,
        key: &S::Key,
        timeout: Option<Duration>,
    ) -> WaitResult<WaitOutcome>
    where
        S: Observable + 'static,
        P: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.try_wait_outcome(
            move |s: &S| Ok::<bool, Infallible>(predicate(s)),
            subject,
            key,
            timeout,
        )
    }

    /// Wait with a fallible predicate
    ///
    /// An `Err` from the predicate, on either the waiting thread or a
    /// notifying thread, ends the wait with `WaitError::Predicate`.
    pub fn try_wait<S, P, E>(
        &self,
        predicate: P,
        subject: &Arc<S>,
        key: &S::Key,
        timeout: Option<Duration>,
    ) -> WaitResult<()>
    where
        S: Observable + 'static,
        P: Fn(&S) -> Result<bool, E> + Send + Sync + 'static,
        E: Display,
    {
        self.try_wait_outcome(predicate, subject, key, timeout)?
            .into_result(timeout.unwrap_or_default())
    }

    /// Fallible predicate, timeout reported as an outcome
    pub fn try_wait_outcome<S, P, E>(
        &self,
        predicate: P,
        subject: &Arc<S>,
        key: &S::Key,
        timeout: Option<Duration>,
    ) -> WaitResult<WaitOutcome>
    where
        S: Observable + 'static,
        P: Fn(&S) -> Result<bool, E> + Send + Sync + 'static,
        E: Display,
    {
        let span = span_wait(key, timeout);
        let _entered = span.enter();

        let gate = Arc::new(Gate::new());
        let predicate = Arc::new(predicate);
        let callback = recheck_callback(&gate, subject, &predicate);

        // Subscribe before the first check so a concurrent change is never lost
        let guard = SubscriptionGuard::subscribe(subject.as_ref(), key, callback);

        let outcome = match predicate(subject.as_ref()) {
            Ok(true) => {
                debug!(subscription = %guard.id(), "condition already satisfied");
                WaitOutcome::Satisfied
            }
            Ok(false) => self.block_on(&gate, timeout)?,
            Err(e) => return Err(WaitError::Predicate(e.to_string())),
        };

        drop(guard);
        Ok(outcome)
    }

    /// Block on the gate according to the timeout policy
    ///
    /// An open gate wins over a raised interrupt flag: the flag is only
    /// consulted while the gate is still unset.
    fn block_on(&self, gate: &Gate, timeout: Option<Duration>) -> WaitResult<WaitOutcome> {
        let slice = self.config.effective_poll_slice();
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        let mut state = gate.state();

        loop {
            match state {
                GateState::Set => {
                    debug!("condition satisfied by change notification");
                    return Ok(WaitOutcome::Satisfied);
                }
                GateState::Failed(reason) => return Err(WaitError::Predicate(reason)),
                GateState::Unset => {}
            }

            if self.config.interrupted() {
                debug!("wait interrupted");
                return Err(WaitError::Interrupted);
            }

            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    warn!(
                        timeout_ms = ?timeout.map(|t| t.as_millis()),
                        "timed out waiting for condition"
                    );
                    return Ok(WaitOutcome::TimedOut);
                }
            }

            let now = Instant::now();
            let wake_at = match deadline {
                Some(deadline) => deadline.min(now + slice),
                None => now + slice,
            };
            state = gate.wait_until(wake_at);
            trace!(?state, "poll slice elapsed");
        }
    }
}

/// Build the notification-side callback
///
/// Holds only weak references: a notification arriving after the wait
/// returned finds the gate gone and does nothing.
fn recheck_callback<S, P, E>(
    gate: &Arc<Gate>,
    subject: &Arc<S>,
    predicate: &Arc<P>,
) -> ChangeCallback
where
    S: Observable + 'static,
    P: Fn(&S) -> Result<bool, E> + Send + Sync + 'static,
    E: Display,
{
    let gate = Arc::downgrade(gate);
    let subject = Arc::downgrade(subject);
    let predicate = Arc::clone(predicate);

    Arc::new(move || {
        let (Some(gate), Some(subject)) = (gate.upgrade(), subject.upgrade()) else {
            return;
        };
        if gate.is_open() {
            return;
        }

        match predicate(subject.as_ref()) {
            Ok(true) => {
                gate.set();
            }
            Ok(false) => trace!("condition re-checked, still false"),
            Err(e) => {
                gate.fail(e.to_string());
            }
        }
    })
}

/// Wait until `predicate(subject)` holds, using the default configuration
///
/// Shorthand for `ConditionWaiter::with_defaults().wait(...)`.
pub fn wait_for_condition<S, P>(
    predicate: P,
    subject: &Arc<S>,
    key: &S::Key,
    timeout: Option<Duration>,
) -> WaitResult<()>
where
    S: Observable + 'static,
    P: Fn(&S) -> bool + Send + Sync + 'static,
{
    ConditionWaiter::with_defaults().wait(predicate, subject, key, timeout)
}

/// Fallible-predicate form of `wait_for_condition`
pub fn try_wait_for_condition<S, P, E>(
    predicate: P,
    subject: &Arc<S>,
    key: &S::Key,
    timeout: Option<Duration>,
) -> WaitResult<()>
where
    S: Observable + 'static,
    P: Fn(&S) -> Result<bool, E> + Send + Sync + 'static,
    E: Display,
{
    ConditionWaiter::with_defaults().try_wait(predicate, subject, key, timeout)
}
