//! Driver trait for abstracting transport.
//!
//! The [`Driver`] trait decouples the runtime from a specific HTTP stack.
//! Each platform implements it to perform requests, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use litebind_core::Request;
use serde_json::Value;

/// Performs the requests a binder asks for.
pub trait Driver {
    /// Platform-specific transport error.
    type Error: std::error::Error + 'static;

    /// Perform a request and return its parsed JSON response.
    ///
    /// Fetch and source requests expect a JSON body. Submit requests may
    /// answer with anything; an empty body should be reported as
    /// [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns an error on network or HTTP failure, or if the body is not
    /// JSON. The runtime reports it to the binder, which skips the step that
    /// depended on the response.
    fn send(&mut self, request: &Request) -> impl Future<Output = Result<Value, Self::Error>>;
}
