//! Runtime error type.

use litebind_core::BinderError;
use thiserror::Error;

/// Error raised while executing binder actions.
///
/// Transport failures are not errors here; they are reported to the binder
/// and otherwise swallowed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// The binder rejected a reported outcome
    #[error(transparent)]
    Binder(#[from] BinderError),
}
