//! Process-wide tracing setup shared by binaries and tests.

/// Tracing/logging configuration.
pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}
