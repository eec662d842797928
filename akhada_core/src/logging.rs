//! Logging infrastructure for Health Akhada.
//!
//! Provides centralized tracing setup for the CLI.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at INFO, overridable with RUST_LOG
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (debug, info, warn, error)
///
/// RUST_LOG still takes precedence. Output goes to stderr so that cards
/// printed on stdout stay clean.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
