//! Logging initialisation.
//!
//! Output goes through `tracing-subscriber`, filtered by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialises the global subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`, e.g.
/// `RUST_LOG=payroll_engine=debug` to see per-employee calculation detail.
///
/// # Example
///
/// ```no_run
/// payroll_engine::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Initialises a debug-level subscriber that writes through the test harness.
///
/// Safe to call from several tests; only the first call installs it.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
