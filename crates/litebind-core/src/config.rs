//! Binder configuration.
//!
//! Options use the names of the JSON configuration surface (`getURL`,
//! `viewSelector`, ...). Every option is optional; missing options take the
//! defaults documented on each field.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::{
    error::ConfigError,
    payload::Scalar,
    source::{SourceMap, parse_source},
};

/// HTTP method used for fetch and submit requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    /// `GET` (default)
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// GET-style requests carry their data in the URI.
    pub fn is_get(self) -> bool {
        self == Self::Get
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ConfigError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positional fetch argument.
///
/// In URI-segment mode only the value is used. Otherwise a pair renders as
/// `name=value` and a bare value renders as itself. Non-string JSON values
/// (`5`, `true`, `["id", 5]`) are accepted in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Argument {
    /// `[name, value]`
    Pair(String, String),
    /// `value`
    Value(String),
}

impl Argument {
    /// Value used as a URI path segment.
    pub fn segment(&self) -> &str {
        match self {
            Self::Pair(_, value) | Self::Value(value) => value,
        }
    }

    /// Form used in an `&`-joined query string.
    pub fn query_fragment(&self) -> String {
        match self {
            Self::Pair(name, value) => format!("{name}={value}"),
            Self::Value(value) => value.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for Argument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(pair) => match <[Value; 2]>::try_from(pair) {
                Ok([name, value]) => {
                    Ok(Self::Pair(Scalar::from(name).text(), Scalar::from(value).text()))
                },
                Err(items) => Err(de::Error::invalid_length(items.len(), &"a [name, value] pair")),
            },
            value => Ok(Self::Value(Scalar::from(value).text())),
        }
    }
}

/// Where the enumerable choice sets come from.
///
/// A string is a URL. An object or an array is an inline source, read with
/// the same rules as a fetched one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourceSpec {
    /// URL returning the source map as JSON
    Url(String),
    /// Source map supplied directly
    Inline(SourceMap),
}

impl<'de> Deserialize<'de> for SourceSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(url) => Ok(Self::Url(url)),
            inline @ (Value::Object(_) | Value::Array(_)) => {
                Ok(Self::Inline(parse_source(&inline).unwrap_or_default()))
            },
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(&other.to_string()),
                &"a URL, an object or an array",
            )),
        }
    }
}

/// What to do with a fetch response that completes after a later-issued one
/// was already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Apply responses in completion order (default)
    #[default]
    Apply,
    /// Drop responses older than the newest applied fetch
    Discard,
}

/// Full binder configuration.
///
/// Owned by exactly one binder. The only fields a binder mutates after
/// construction are the two endpoints, when an operation supplies an
/// override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Endpoint used by `get`
    #[serde(rename = "getURL")]
    pub get_url: String,
    /// Endpoint used by `set`
    #[serde(rename = "setURL")]
    pub set_url: String,
    /// Choice sets for select and radio widgets (default: none)
    pub source: Option<SourceSpec>,
    /// Name of the key attribute (default `"name"`)
    pub key: String,
    /// Request method (default `GET`)
    #[serde(rename = "type")]
    pub method: Method,
    /// Selector collecting the views; the key filter is appended per clause
    #[serde(rename = "viewSelector")]
    pub view_selector: String,
    /// Positional arguments for `get`
    pub arguments: Vec<Argument>,
    /// Issue a `get` when the binder starts (default true)
    #[serde(rename = "getOnInit")]
    pub get_on_init: bool,
    /// Submit only views in edit mode (default true)
    #[serde(rename = "setInputsOnly")]
    pub set_inputs_only: bool,
    /// Refresh the views before every get and set (default false)
    #[serde(rename = "autoRefresh")]
    pub auto_refresh: bool,
    /// Send `get` arguments as URI path segments (default false)
    #[serde(rename = "useURISegments")]
    pub use_uri_segments: bool,
    /// Label shown for a true checkbox in display mode (default `"True"`)
    #[serde(rename = "trueDisplay")]
    pub true_display: String,
    /// Label shown for a false checkbox in display mode (default `"False"`)
    #[serde(rename = "falseDisplay")]
    pub false_display: String,
    /// Handling of out-of-order fetch responses (default `apply`)
    #[serde(rename = "staleResponses")]
    pub stale_responses: StalePolicy,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            get_url: String::new(),
            set_url: String::new(),
            source: None,
            key: "name".to_string(),
            method: Method::Get,
            view_selector: String::new(),
            arguments: Vec::new(),
            get_on_init: true,
            set_inputs_only: true,
            auto_refresh: false,
            use_uri_segments: false,
            true_display: "True".to_string(),
            false_display: "False".to_string(),
            stale_responses: StalePolicy::Apply,
        }
    }
}

impl BinderConfig {
    /// Load a configuration from its JSON form.
    ///
    /// Unknown options are ignored.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BinderConfig::from_json("{}").unwrap();

        assert_eq!(config.key, "name");
        assert_eq!(config.method, Method::Get);
        assert!(config.get_on_init);
        assert!(config.set_inputs_only);
        assert!(!config.auto_refresh);
        assert!(!config.use_uri_segments);
        assert_eq!(config.true_display, "True");
        assert_eq!(config.false_display, "False");
        assert_eq!(config.stale_responses, StalePolicy::Apply);
        assert!(config.source.is_none());
    }

    #[test]
    fn parses_full_option_set() {
        let config = BinderConfig::from_json(
            r#"{
                "getURL": "/api/user",
                "setURL": "/api/user/save",
                "source": {"color": {"1": "Red", "2": "Blue"}},
                "key": "data-field",
                "type": "post",
                "viewSelector": "span, input",
                "arguments": [["id", "5"], "active"],
                "getOnInit": false,
                "setInputsOnly": false,
                "autoRefresh": true,
                "useURISegments": true,
                "trueDisplay": "Yes",
                "falseDisplay": "No",
                "staleResponses": "discard",
                "onGet": "ignored"
            }"#,
        )
        .unwrap();

        assert_eq!(config.get_url, "/api/user");
        assert_eq!(config.set_url, "/api/user/save");
        assert_eq!(config.key, "data-field");
        assert_eq!(config.method, Method::Post);
        assert_eq!(config.view_selector, "span, input");
        assert_eq!(
            config.arguments,
            vec![Argument::Pair("id".into(), "5".into()), Argument::Value("active".into())]
        );
        assert!(!config.get_on_init);
        assert!(!config.set_inputs_only);
        assert!(config.auto_refresh);
        assert!(config.use_uri_segments);
        assert_eq!(config.true_display, "Yes");
        assert_eq!(config.false_display, "No");
        assert_eq!(config.stale_responses, StalePolicy::Discard);

        let Some(SourceSpec::Inline(source)) = config.source else {
            unreachable!("inline source expected");
        };
        assert_eq!(source["color"]["2"], "Blue");
    }

    #[test]
    fn source_url_is_recognized() {
        let config = BinderConfig::from_json(r#"{"source": "/api/sources"}"#).unwrap();
        assert_eq!(config.source, Some(SourceSpec::Url("/api/sources".into())));
    }

    #[test]
    fn inline_sources_accept_arrays_and_non_string_labels() {
        let config = BinderConfig::from_value(json!({"source": [["Low", "High"]]})).unwrap();
        let Some(SourceSpec::Inline(source)) = config.source else {
            unreachable!("inline source expected");
        };
        assert_eq!(source["0"]["0"], "Low");
        assert_eq!(source["0"]["1"], "High");

        let config = BinderConfig::from_value(json!({"source": {"level": {"1": 10}}})).unwrap();
        let Some(SourceSpec::Inline(source)) = config.source else {
            unreachable!("inline source expected");
        };
        assert_eq!(source["level"]["1"], "10");
    }

    #[test]
    fn empty_inline_source_is_empty_map() {
        let config = BinderConfig::from_value(json!({"source": {}})).unwrap();
        assert_eq!(config.source, Some(SourceSpec::Inline(SourceMap::new())));
        assert!(BinderConfig::from_value(json!({"source": 5})).is_err());
    }

    #[test]
    fn arguments_accept_scalars() {
        let config =
            BinderConfig::from_value(json!({"arguments": [5, "active", ["id", 7], true]})).unwrap();

        assert_eq!(
            config.arguments,
            vec![
                Argument::Value("5".into()),
                Argument::Value("active".into()),
                Argument::Pair("id".into(), "7".into()),
                Argument::Value("true".into()),
            ]
        );
        assert!(BinderConfig::from_value(json!({"arguments": [["a", "b", "c"]]})).is_err());
    }

    #[test]
    fn rejects_unknown_method() {
        let result = BinderConfig::from_json(r#"{"type": "FETCH"}"#);
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
        assert!(matches!("FETCH".parse::<Method>(), Err(ConfigError::UnsupportedMethod(_))));
    }

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Delete".parse::<Method>().unwrap(), Method::Delete);
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn argument_rendering() {
        let pair = Argument::Pair("id".into(), "5".into());
        let bare = Argument::Value("active".into());

        assert_eq!(pair.segment(), "5");
        assert_eq!(pair.query_fragment(), "id=5");
        assert_eq!(bare.segment(), "active");
        assert_eq!(bare.query_fragment(), "active");
    }
}
