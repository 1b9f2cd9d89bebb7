//! Process-wide logging setup for EventHub binaries.
//!
//! Library crates only emit through `tracing`; installing a subscriber is the
//! binary's call.

pub mod tracing;

/// Initialize JSON logging (idempotent).
pub fn init() {
    tracing::init();
}

/// Initialize human-readable logging for interactive tools (idempotent).
pub fn init_pretty() {
    tracing::init_pretty();
}
