//! Log subscriber setup.
//!
//! The library only emits `tracing` events; binaries and tests call one of
//! these once to print them.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a global subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Subscriber for tests: `debug` level, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
