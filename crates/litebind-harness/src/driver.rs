//! Scripted transport.
//!
//! [`ScriptedDriver`] answers requests from per-URI queues of canned
//! outcomes and records every request it sees. Unscripted URIs fail, which
//! lets tests assert that a failed step applies nothing.

use std::collections::{HashMap, VecDeque};

use litebind_app::Driver;
use litebind_core::Request;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// Failure reported by [`ScriptedDriver`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// No outcome was scripted for the URI
    #[error("no response scripted for {0}")]
    Unrouted(String),

    /// A failure was scripted for the URI
    #[error("scripted failure: {0}")]
    Scripted(String),
}

/// Driver replaying scripted outcomes keyed by full request URI.
///
/// Each URI holds a queue; the last remaining outcome is sticky so a route
/// scripted once answers every later request too.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDriver {
    routes: HashMap<String, VecDeque<Result<Value, TransportFailure>>>,
    sent: Vec<Request>,
}

impl ScriptedDriver {
    /// Driver with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for `uri`.
    #[must_use]
    pub fn respond(mut self, uri: &str, response: Value) -> Self {
        self.push(uri, Ok(response));
        self
    }

    /// Queue a failure for `uri`.
    #[must_use]
    pub fn fail(mut self, uri: &str, reason: &str) -> Self {
        self.push(uri, Err(TransportFailure::Scripted(reason.to_string())));
        self
    }

    /// Queue an outcome for `uri`.
    pub fn push(&mut self, uri: &str, outcome: Result<Value, TransportFailure>) {
        self.routes.entry(uri.to_string()).or_default().push_back(outcome);
    }

    /// Requests sent so far, in order.
    pub fn sent(&self) -> &[Request] {
        &self.sent
    }

    /// URIs of the requests sent so far, in order.
    pub fn sent_uris(&self) -> Vec<String> {
        self.sent.iter().map(Request::uri).collect()
    }

    fn next_outcome(&mut self, uri: &str) -> Result<Value, TransportFailure> {
        let Some(queue) = self.routes.get_mut(uri) else {
            return Err(TransportFailure::Unrouted(uri.to_string()));
        };
        let outcome = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
        outcome.unwrap_or_else(|| Err(TransportFailure::Unrouted(uri.to_string())))
    }
}

impl Driver for ScriptedDriver {
    type Error = TransportFailure;

    async fn send(&mut self, request: &Request) -> Result<Value, TransportFailure> {
        let uri = request.uri();
        trace!(id = %request.id, uri = %uri, "scripted send");
        self.sent.push(request.clone());
        self.next_outcome(&uri)
    }
}
