/*!
 * Wait Tracing
 * Structured tracing for condition waits using the tracing crate
 *
 * Features:
 * - Per-wait span with a unique wait ID for correlating callback logs
 * - JSON-formatted logs for structured parsing
 * - Thread IDs on every line, since callbacks run on notifier threads
 */

use crate::core::limits::TRACE_JSON_ENV;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - WAIT_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        // JSON output for production/parsing
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        // Human-readable output for development
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        debug!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one condition wait
pub fn span_wait(key: &dyn Debug, timeout: Option<Duration>) -> Span {
    span!(
        Level::DEBUG,
        "condition_wait",
        wait_id = %Uuid::new_v4(),
        key = ?key,
        timeout = ?timeout,
    )
}
