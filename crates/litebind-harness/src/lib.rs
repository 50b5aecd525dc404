//! Deterministic test harness for Litebind.
//!
//! In-memory implementations of the [`litebind_core::Document`] and
//! [`litebind_app::Driver`] traits, plus a hook recorder, for reproducible
//! tests of the binding engine without a browser or a network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod driver;
pub mod hooks;
pub mod selector;

pub use document::{MemoryDocument, NodeId};
pub use driver::{ScriptedDriver, TransportFailure};
pub use hooks::{HookLog, RecordingHooks};

/// Install a test-writer `tracing` subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
