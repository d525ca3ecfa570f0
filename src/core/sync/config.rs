/*!
 * Wait Configuration
 *
 * Runtime configuration for the condition waiter: poll slice and
 * interruption source.
 */

use super::interrupt::InterruptFlag;
use crate::core::limits::{
    DEFAULT_POLL_SLICE, MAX_POLL_SLICE, MIN_POLL_SLICE, POLL_SLICE_ENV, RELAXED_POLL_SLICE,
    RESPONSIVE_POLL_SLICE,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;
use tracing::warn;

/// Condition waiter configuration
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Longest single block on the gate before re-checking for interruption
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "poll_slice_ms")]
    pub poll_slice: Duration,
    /// Interruption source checked between poll slices
    #[serde(skip)]
    pub interrupt: Option<InterruptFlag>,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_slice: DEFAULT_POLL_SLICE,
            interrupt: None,
        }
    }
}

impl WaitConfig {
    /// Configuration for waiters that must react to interruption quickly
    pub const fn responsive() -> Self {
        Self {
            poll_slice: RESPONSIVE_POLL_SLICE,
            interrupt: None,
        }
    }

    /// Configuration for long waits where wakeups are rare
    pub const fn relaxed() -> Self {
        Self {
            poll_slice: RELAXED_POLL_SLICE,
            interrupt: None,
        }
    }

    /// Load defaults, overriding the poll slice from `WAIT_POLL_SLICE_MS`
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(POLL_SLICE_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.with_poll_slice(Duration::from_millis(ms)),
                _ => {
                    warn!(value = %raw, "Ignoring invalid {}", POLL_SLICE_ENV);
                    config
                }
            },
            Err(_) => config,
        }
    }

    /// Parse a JSON document such as `{"poll_slice_ms": 20}`
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        let slice = config.effective_poll_slice();
        Ok(config.with_poll_slice(slice))
    }

    /// Set the poll slice, clamped to `[MIN_POLL_SLICE, MAX_POLL_SLICE]`
    pub fn with_poll_slice(mut self, slice: Duration) -> Self {
        self.poll_slice = slice.clamp(MIN_POLL_SLICE, MAX_POLL_SLICE);
        self
    }

    pub fn with_interrupt(mut self, flag: InterruptFlag) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Poll slice actually used, clamped even if the field was set directly
    #[inline]
    pub fn effective_poll_slice(&self) -> Duration {
        self.poll_slice.clamp(MIN_POLL_SLICE, MAX_POLL_SLICE)
    }

    #[inline]
    pub fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(InterruptFlag::is_interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    fn test_presets() {
        assert_eq!(WaitConfig::default().poll_slice, DEFAULT_POLL_SLICE);
        assert_eq!(WaitConfig::responsive().poll_slice, RESPONSIVE_POLL_SLICE);
        assert_eq!(WaitConfig::relaxed().poll_slice, RELAXED_POLL_SLICE);
    }

    #[test]
    fn test_poll_slice_is_clamped() {
        let config = WaitConfig::default().with_poll_slice(Duration::ZERO);
        assert_eq!(config.poll_slice, MIN_POLL_SLICE);

        let config = WaitConfig::default().with_poll_slice(Duration::from_secs(60));
        assert_eq!(config.poll_slice, MAX_POLL_SLICE);

        let config = WaitConfig {
            poll_slice: Duration::ZERO,
            interrupt: None,
        };
        assert_eq!(config.effective_poll_slice(), MIN_POLL_SLICE);
    }

    #[test]
    fn test_interrupted_follows_flag() {
        let flag = InterruptFlag::new();
        let config = WaitConfig::default().with_interrupt(flag.clone());
        assert!(!config.interrupted());

        flag.interrupt();
        assert!(config.interrupted());
        assert!(!WaitConfig::default().interrupted());
    }

    #[test]
    fn test_from_json() {
        let config = WaitConfig::from_json(r#"{"poll_slice_ms": 20}"#).unwrap();
        assert_eq!(config.poll_slice, Duration::from_millis(20));

        let config = WaitConfig::from_json("{}").unwrap();
        assert_eq!(config.poll_slice, DEFAULT_POLL_SLICE);

        let config = WaitConfig::from_json(r#"{"poll_slice_ms": 0}"#).unwrap();
        assert_eq!(config.poll_slice, MIN_POLL_SLICE);

        assert!(WaitConfig::from_json(r#"{"poll_slice_ms": "fast"}"#).is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        std::env::set_var(POLL_SLICE_ENV, "15");
        assert_eq!(WaitConfig::from_env().poll_slice, Duration::from_millis(15));

        std::env::set_var(POLL_SLICE_ENV, "not-a-number");
        assert_eq!(WaitConfig::from_env().poll_slice, DEFAULT_POLL_SLICE);

        std::env::set_var(POLL_SLICE_ENV, "0");
        assert_eq!(WaitConfig::from_env().poll_slice, DEFAULT_POLL_SLICE);

        std::env::remove_var(POLL_SLICE_ENV);
        assert_eq!(WaitConfig::from_env().poll_slice, DEFAULT_POLL_SLICE);
    }
}
