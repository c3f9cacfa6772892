//! Tracing subscriber setup for the binary
//!
//! Library code only emits events; installing a subscriber is left to the
//! process entry point.

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber with `filter`
///
/// Falls back to `info` on an unparsable filter. Calling it twice is a no-op.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
