//! Request options accepted by the request facade.

use serde_json::{Map, Value};

use crate::error::ApironeError;

/// Options of a single API call.
///
/// Builders from [`crate::types`] convert into this with `From`, so every
/// endpoint accepts either a builder, a plain JSON map, or a literal
/// pre-encoded string.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOptions {
    /// Key/value options, encoded by the client
    Map(Map<String, Value>),
    /// Already encoded body or query string, sent verbatim
    Raw(String),
    /// A builder that could not be projected; any call made with these
    /// options fails with [`ApironeError::InvalidArgument`] before sending
    Invalid(String),
}

impl RequestOptions {
    /// No options.
    pub fn empty() -> Self {
        RequestOptions::Map(Map::new())
    }

    /// Whether there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            RequestOptions::Map(map) => map.is_empty(),
            RequestOptions::Raw(raw) => raw.is_empty(),
            RequestOptions::Invalid(_) => false,
        }
    }

    /// Set a single key. Only meaningful for map options; other options are left as is.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if let RequestOptions::Map(map) = self {
            map.insert(key.into(), value.into());
        }
    }

    /// Turn into a map, parsing raw options as a JSON object.
    ///
    /// Raw text that is not a JSON object is rejected, since keys can not be
    /// added to it.
    pub fn into_map(self) -> Result<Map<String, Value>, ApironeError> {
        match self {
            RequestOptions::Invalid(reason) => Err(ApironeError::InvalidArgument(reason)),
            RequestOptions::Map(map) => Ok(map),
            RequestOptions::Raw(raw) if raw.is_empty() => Ok(Map::new()),
            RequestOptions::Raw(raw) => match serde_json::from_str(&raw)? {
                Value::Object(map) => Ok(map),
                _ => Err(ApironeError::InvalidArgument(
                    "raw options must be a JSON object".to_string(),
                )),
            },
        }
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Map<String, Value>> for RequestOptions {
    fn from(map: Map<String, Value>) -> Self {
        RequestOptions::Map(map)
    }
}

impl From<String> for RequestOptions {
    fn from(raw: String) -> Self {
        RequestOptions::Raw(raw)
    }
}

impl From<&str> for RequestOptions {
    fn from(raw: &str) -> Self {
        RequestOptions::Raw(raw.to_string())
    }
}

impl From<()> for RequestOptions {
    fn from(_: ()) -> Self {
        RequestOptions::empty()
    }
}

/// Serialize a builder projection into map options.
///
/// A projection that fails to serialize, or that is not a JSON object,
/// yields [`RequestOptions::Invalid`].
pub(crate) fn to_options<T: serde::Serialize>(value: &T) -> RequestOptions {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => RequestOptions::Map(map),
        Ok(other) => RequestOptions::Invalid(format!("options must be a JSON object, got {other}")),
        Err(e) => RequestOptions::Invalid(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_map_from_raw_json() {
        let options = RequestOptions::from(r#"{"currency":"btc"}"#);
        let map = options.into_map().unwrap();
        assert_eq!(map.get("currency"), Some(&json!("btc")));
    }

    #[test]
    fn test_into_map_rejects_non_object() {
        assert!(RequestOptions::from("[1,2]").into_map().is_err());
        assert!(RequestOptions::from("a=b").into_map().is_err());
    }

    #[test]
    fn test_to_options_reports_failures() {
        assert_eq!(
            to_options(&json!(["btc"])),
            RequestOptions::Invalid(r#"options must be a JSON object, got ["btc"]"#.to_string())
        );

        let options = to_options(&json!({"currency": "btc"}));
        assert_eq!(options.into_map().unwrap().get("currency"), Some(&json!("btc")));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let options = RequestOptions::Invalid("bad date".to_string());
        assert!(!options.is_empty());
        assert!(matches!(
            options.into_map(),
            Err(ApironeError::InvalidArgument(reason)) if reason == "bad date"
        ));
    }

    #[test]
    fn test_insert_ignores_raw() {
        let mut options = RequestOptions::from("a=b");
        options.insert("c", "d");
        assert_eq!(options, RequestOptions::Raw("a=b".to_string()));
    }
}
