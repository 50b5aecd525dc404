//! Declarative network effects.
//!
//! The binder never talks to the network. Operations return
//! [`BinderAction`]s; the runtime executes each [`Request`] and reports the
//! outcome back under the request's [`RequestId`].

use std::fmt;

use crate::{
    config::{Argument, Method},
    payload::KeyedPayload,
};

/// Identifies an in-flight request. Strictly increasing per binder, so ids
/// also order requests by issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Wrap a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a request is for. Decides how its response is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// `get`: response is a keyed payload applied to the views
    Fetch,
    /// `set`: response is forwarded to the set hook
    Submit,
    /// Source resolution: response is a source map
    Source,
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    Empty,
    /// `&`-joined `name=value` pairs
    Encoded(String),
    /// Keyed payload, serialized by the runtime
    Payload(KeyedPayload),
}

/// A network request the runtime must perform.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Id to report the outcome under
    pub id: RequestId,
    /// Purpose of the request
    pub kind: RequestKind,
    /// HTTP method
    pub method: Method,
    /// Target URL without any query derived from the body
    pub url: String,
    /// Body
    pub body: RequestBody,
}

impl Request {
    /// Full request URI.
    ///
    /// For `GET` the body travels as a query string: encoded bodies are
    /// appended verbatim and payloads as `key=value` pairs whose values were
    /// already prepared for the URI at extraction time.
    pub fn uri(&self) -> String {
        if !self.method.is_get() {
            return self.url.clone();
        }

        let query = match &self.body {
            RequestBody::Empty => return self.url.clone(),
            RequestBody::Encoded(query) => query.clone(),
            RequestBody::Payload(payload) => payload
                .iter()
                .map(|(key, value)| format!("{}={value}", urlencoding::encode(key)))
                .collect::<Vec<_>>()
                .join("&"),
        };

        if query.is_empty() {
            return self.url.clone();
        }
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{query}", self.url)
    }
}

/// Effect requested by the binder.
#[derive(Debug, Clone, PartialEq)]
pub enum BinderAction {
    /// Perform this request and report the outcome
    Send(Request),
}

/// Target URL and body of a fetch.
///
/// In URI-segment mode every argument value is followed by `/` and the
/// result appended to the endpoint after a `/`, with an empty body.
/// Otherwise the arguments become an `&`-joined body; no arguments means no
/// body.
pub fn fetch_target(endpoint: &str, arguments: &[Argument], use_segments: bool) -> (String, RequestBody) {
    if use_segments {
        let segments: String = arguments.iter().map(|arg| format!("{}/", arg.segment())).collect();
        return (format!("{endpoint}/{segments}"), RequestBody::Empty);
    }

    if arguments.is_empty() {
        return (endpoint.to_string(), RequestBody::Empty);
    }

    let query = arguments.iter().map(Argument::query_fragment).collect::<Vec<_>>().join("&");
    (endpoint.to_string(), RequestBody::Encoded(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Scalar;

    fn request(method: Method, url: &str, body: RequestBody) -> Request {
        Request { id: RequestId::new(1), kind: RequestKind::Fetch, method, url: url.into(), body }
    }

    #[test]
    fn uri_segments_are_slash_joined() {
        let args = [Argument::Value("5".into()), Argument::Value("active".into())];
        let (url, body) = fetch_target("/api/items", &args, true);

        assert_eq!(url, "/api/items/5/active/");
        assert_eq!(body, RequestBody::Empty);
    }

    #[test]
    fn uri_segments_use_pair_values() {
        let args = [Argument::Pair("id".into(), "5".into())];
        let (url, _) = fetch_target("/api/items", &args, true);
        assert_eq!(url, "/api/items/5/");
    }

    #[test]
    fn arguments_become_query_pairs() {
        let args = [Argument::Pair("id".into(), "5".into()), Argument::Pair("q".into(), "x".into())];
        let (url, body) = fetch_target("/api/items", &args, false);

        assert_eq!(url, "/api/items");
        assert_eq!(body, RequestBody::Encoded("id=5&q=x".into()));
    }

    #[test]
    fn no_arguments_means_no_body() {
        let (url, body) = fetch_target("/api/items", &[], false);
        assert_eq!(url, "/api/items");
        assert_eq!(body, RequestBody::Empty);
    }

    #[test]
    fn get_uri_carries_query() {
        let req = request(Method::Get, "/api/items", RequestBody::Encoded("id=5".into()));
        assert_eq!(req.uri(), "/api/items?id=5");

        let req = request(Method::Get, "/api/items?v=2", RequestBody::Encoded("id=5".into()));
        assert_eq!(req.uri(), "/api/items?v=2&id=5");
    }

    #[test]
    fn get_uri_carries_payload() {
        let mut payload = KeyedPayload::new();
        payload.insert("first name".into(), Scalar::from("Ada%20B"));
        payload.insert("admin".into(), Scalar::from(true));

        let req = request(Method::Get, "/save", RequestBody::Payload(payload));
        assert_eq!(req.uri(), "/save?first%20name=Ada%20B&admin=true");
    }

    #[test]
    fn non_get_uri_is_plain_url() {
        let req = request(Method::Post, "/api/items", RequestBody::Encoded("id=5".into()));
        assert_eq!(req.uri(), "/api/items");
    }

    #[test]
    fn request_ids_order_by_issuance() {
        assert!(RequestId::new(1) < RequestId::new(2));
        assert_eq!(RequestId::new(7).to_string(), "#7");
    }
}
