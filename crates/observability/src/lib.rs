//! Process-wide logging setup.

/// Tracing subscriber configuration.
pub mod tracing;

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
