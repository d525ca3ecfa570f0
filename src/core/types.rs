/*!
 * Core Types
 * Common types used across the wait primitive
 */

use super::errors::{WaitError, WaitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Handle returned by `Observable::subscribe`
///
/// Opaque to callers; only the issuing subject can interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// How a wait ended when it ended normally
///
/// Interruption and predicate failures are errors, never outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitOutcome {
    Satisfied,
    TimedOut,
}

impl WaitOutcome {
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }

    /// Convert to a result, mapping `TimedOut` to `WaitError::Timeout`
    pub fn into_result(self, timeout: Duration) -> WaitResult<()> {
        match self {
            Self::Satisfied => Ok(()),
            Self::TimedOut => Err(WaitError::timeout(timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_id_display() {
        assert_eq!(SubscriptionId::new(7).to_string(), "sub#7");
        assert_eq!(SubscriptionId::new(7).as_u64(), 7);
    }

    #[test]
    fn test_outcome_into_result() {
        assert!(WaitOutcome::Satisfied.into_result(Duration::ZERO).is_ok());
        assert_eq!(
            WaitOutcome::TimedOut.into_result(Duration::from_millis(5)),
            Err(WaitError::Timeout { timeout_ms: 5 })
        );
    }
}
