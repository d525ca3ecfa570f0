/*!
 * Wait Limits and Constants
 *
 * Centralized location for poll slices, clamps, and environment keys
 * used by the condition waiter.
 */

use std::time::Duration;

// =============================================================================
// POLL SLICES
// =============================================================================

/// Default poll slice for waits without a timeout (50ms)
/// Same interval the standard condition wait loops use between re-checks
pub const DEFAULT_POLL_SLICE: Duration = Duration::from_millis(50);

/// Poll slice for callers that need fast interruption (10ms)
pub const RESPONSIVE_POLL_SLICE: Duration = Duration::from_millis(10);

/// Poll slice for long, rarely interrupted waits (250ms)
pub const RELAXED_POLL_SLICE: Duration = Duration::from_millis(250);

/// Lower clamp for configured poll slices (1ms)
/// [PERF] Anything shorter turns the wait into a busy loop
pub const MIN_POLL_SLICE: Duration = Duration::from_millis(1);

/// Upper clamp for configured poll slices (1s)
pub const MAX_POLL_SLICE: Duration = Duration::from_secs(1);

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Poll slice override in milliseconds
pub const POLL_SLICE_ENV: &str = "WAIT_POLL_SLICE_MS";

/// Enables JSON tracing output when set to "1" or "true"
pub const TRACE_JSON_ENV: &str = "WAIT_TRACE_JSON";
