/*!
 * Error Types
 * Wait error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Result type for wait operations
pub type WaitResult<T> = Result<T, WaitError>;

/// Condition wait errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum WaitError {
    #[error("Timed out after {timeout_ms}ms waiting for condition")]
    #[diagnostic(
        code(wait::timeout),
        help("The predicate never became true. Check that the subject notifies the watched property.")
    )]
    Timeout { timeout_ms: u64 },

    #[error("Wait was interrupted")]
    #[diagnostic(
        code(wait::interrupted),
        help("The interrupt flag attached to the wait configuration was raised.")
    )]
    Interrupted,

    #[error("Predicate failed: {0}")]
    #[diagnostic(code(wait::predicate_failed))]
    Predicate(String),
}

impl WaitError {
    /// Build a timeout error for the given wait duration
    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout {
            timeout_ms: timeout.as_millis().min(u64::MAX as u128) as u64,
        }
    }

    #[inline]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    #[inline]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timeout_from_duration() {
        let err = WaitError::timeout(Duration::from_millis(200));
        assert_eq!(err, WaitError::Timeout { timeout_ms: 200 });
        assert!(err.is_timeout());
        assert!(!err.is_interrupted());
        assert_eq!(err.to_string(), "Timed out after 200ms waiting for condition");
    }

    #[test]
    fn test_error_serialization_shape() {
        let json = serde_json::to_value(WaitError::Predicate("boom".into())).unwrap();
        assert_eq!(json["error_type"], "predicate");
        assert_eq!(json["details"], "boom");

        let json = serde_json::to_value(WaitError::timeout(Duration::from_secs(1))).unwrap();
        assert_eq!(json["details"]["timeout_ms"], 1000);
    }
}
