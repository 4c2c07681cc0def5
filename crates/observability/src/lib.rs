//! Process-wide tracing setup for EARA binaries and tests.

pub mod capture;
/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::capture::{CapturedLogs, capture};
pub use crate::tracing::{DEFAULT_FILTER, LogFormat, init_with};

/// Install the default subscriber: JSON lines, filtered by `RUST_LOG`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
