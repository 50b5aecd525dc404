//! Enumerable choice sets backing select and radio widgets.
//!
//! A source is either supplied inline or fetched from a URL. Resolution state
//! is explicit: until a fetch returns a non-empty map the source stays
//! [`SourceState::Unresolved`] and every lookup misses, which callers treat
//! as "no enumerable choice" rather than an error.

use indexmap::IndexMap;
use serde_json::Value;

use crate::{config::SourceSpec, payload::Scalar};

/// Ordered option value → display label.
pub type Choices = IndexMap<String, String>;

/// Key → ordered choices.
pub type SourceMap = IndexMap<String, Choices>;

/// Resolution state of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState {
    /// Waiting for a non-empty response from this URL
    Unresolved {
        /// URL the source is fetched from
        url: String,
    },
    /// Source map available in memory
    Resolved(SourceMap),
}

/// Holds the source and tracks whether it still needs fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResolver {
    state: SourceState,
}

impl SourceResolver {
    /// Create a resolver from the configured source.
    ///
    /// No source at all is an empty, resolved map.
    pub fn new(spec: Option<SourceSpec>) -> Self {
        let state = match spec {
            Some(SourceSpec::Url(url)) => SourceState::Unresolved { url },
            Some(SourceSpec::Inline(map)) => SourceState::Resolved(map),
            None => SourceState::Resolved(SourceMap::new()),
        };
        Self { state }
    }

    /// Current resolution state.
    pub fn state(&self) -> &SourceState {
        &self.state
    }

    /// True once the source map is in memory.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, SourceState::Resolved(_))
    }

    /// URL that still has to be fetched, if the source is unresolved.
    ///
    /// Resolution is retried on every call while this returns `Some`.
    pub fn pending_url(&self) -> Option<&str> {
        match &self.state {
            SourceState::Unresolved { url } => Some(url),
            SourceState::Resolved(_) => None,
        }
    }

    /// Choices for a key. Misses while unresolved.
    pub fn choices(&self, key: &str) -> Option<&Choices> {
        match &self.state {
            SourceState::Resolved(map) => map.get(key),
            SourceState::Unresolved { .. } => None,
        }
    }

    /// Label of one option of a key.
    pub fn lookup(&self, key: &str, option: &str) -> Option<&str> {
        self.choices(key).and_then(|choices| choices.get(option)).map(String::as_str)
    }

    /// Accept a fetched source.
    ///
    /// The source is replaced only when the response parses to a non-empty
    /// map; anything else leaves the previous state untouched. Returns
    /// whether the source was replaced.
    pub fn accept(&mut self, response: &Value) -> bool {
        match parse_source(response) {
            Some(map) => {
                self.state = SourceState::Resolved(map);
                true
            },
            None => false,
        }
    }
}

/// Parse a fetched source.
///
/// Accepts an object of `key → {value: label}` or an array, in which case
/// element indices become keys. The inner choice sets follow the same rule.
/// Labels that are not strings use their textual form. Returns `None` for an
/// empty collection or any other shape.
pub fn parse_source(response: &Value) -> Option<SourceMap> {
    let map: SourceMap = entries(response)?
        .into_iter()
        .map(|(key, inner)| (key, parse_choices(inner)))
        .collect();

    if map.is_empty() { None } else { Some(map) }
}

fn parse_choices(value: &Value) -> Choices {
    entries(value)
        .unwrap_or_default()
        .into_iter()
        .map(|(option, label)| (option, Scalar::from(label.clone()).text()))
        .collect()
}

fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => {
            Some(items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect())
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn colors() -> SourceMap {
        let mut choices = Choices::new();
        choices.insert("1".into(), "Red".into());
        choices.insert("2".into(), "Blue".into());

        let mut map = SourceMap::new();
        map.insert("color".into(), choices);
        map
    }

    #[test]
    fn no_source_is_resolved_and_empty() {
        let resolver = SourceResolver::new(None);
        assert!(resolver.is_resolved());
        assert!(resolver.pending_url().is_none());
        assert!(resolver.choices("color").is_none());
    }

    #[test]
    fn inline_source_is_resolved() {
        let resolver = SourceResolver::new(Some(SourceSpec::Inline(colors())));
        assert!(resolver.is_resolved());
        assert_eq!(resolver.lookup("color", "1"), Some("Red"));
        assert_eq!(resolver.lookup("color", "3"), None);
        assert_eq!(resolver.lookup("size", "1"), None);
    }

    #[test]
    fn url_source_misses_until_resolved() {
        let mut resolver = SourceResolver::new(Some(SourceSpec::Url("/sources".into())));
        assert_eq!(resolver.pending_url(), Some("/sources"));
        assert_eq!(resolver.lookup("color", "1"), None);

        assert!(resolver.accept(&json!({"color": {"1": "Red", "2": "Blue"}})));
        assert!(resolver.is_resolved());
        assert_eq!(resolver.lookup("color", "2"), Some("Blue"));
    }

    #[test]
    fn empty_response_keeps_previous_state() {
        let mut resolver = SourceResolver::new(Some(SourceSpec::Url("/sources".into())));

        assert!(!resolver.accept(&json!({})));
        assert!(!resolver.accept(&json!([])));
        assert!(!resolver.accept(&Value::Null));
        assert!(!resolver.accept(&json!("nope")));
        assert_eq!(resolver.pending_url(), Some("/sources"));
    }

    #[test]
    fn choice_order_is_preserved() {
        let map = parse_source(&json!({"size": {"s": "Small", "m": "Medium", "l": "Large"}}))
            .unwrap();
        let labels: Vec<&str> = map["size"].values().map(String::as_str).collect();
        assert_eq!(labels, ["Small", "Medium", "Large"]);
    }

    #[test]
    fn arrays_use_indices_as_keys() {
        let map = parse_source(&json!([["Low", "High"], {"x": 1}])).unwrap();
        assert_eq!(map["0"]["1"], "High");
        assert_eq!(map["1"]["x"], "1");
    }
}
