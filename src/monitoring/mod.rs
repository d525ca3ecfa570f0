/*!
 * Monitoring
 * Structured tracing for condition waits
 */

mod tracer;

pub use tracer::{init_tracing, span_wait};
