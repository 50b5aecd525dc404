//! Error types for the binding engine.
//!
//! Most runtime failures are deliberately silent: a lookup miss or a failed
//! transport call simply skips the step that depended on it. The errors here
//! cover malformed configuration and misuse of the Sans-IO interface.

use thiserror::Error;

use crate::request::RequestId;

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document is not valid JSON or has the wrong shape
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The request method is not one the binder can issue
    #[error("unsupported request method: {0}")]
    UnsupportedMethod(String),
}

/// A response or failure was reported for a request the binder does not know.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinderError {
    /// No in-flight request carries this id (already completed, cancelled,
    /// or never issued)
    #[error("no in-flight request {0}")]
    UnknownRequest(RequestId),
}

/// A binder could not be attached to an element.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// The element already owns a binder; detach it first
    #[error("element already has a binder attached")]
    AlreadyAttached,
}
