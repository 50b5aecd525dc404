//! Application runtime for Litebind
//!
//! Executes the declarative actions of a [`litebind_core::Binder`] against a
//! real presentation tree and a real transport, so the same binding logic
//! runs in production and in deterministic simulation.
//!
//! # Components
//!
//! - [`Driver`]: trait for platform-specific transport
//! - [`Runtime`]: orchestration loop feeding outcomes back to the binder

mod driver;
mod error;
mod runtime;

pub use driver::Driver;
pub use error::RuntimeError;
pub use runtime::Runtime;
