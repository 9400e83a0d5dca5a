//! Payload encoding: query strings for GET, JSON bodies for POST/PATCH.

use serde_json::{Map, Value};

use crate::error::ApironeError;
use crate::rest::RequestOptions;

/// How request options are rendered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// `application/x-www-form-urlencoded` query string
    Query,
    /// JSON object body
    JsonBody,
}

/// Encode request options.
///
/// Raw options are returned verbatim. Empty map options encode to an empty
/// string in both modes, so no `{}` body is ever sent.
pub fn encode(options: &RequestOptions, mode: EncodeMode) -> Result<String, ApironeError> {
    let map = match options {
        RequestOptions::Invalid(reason) => return Err(ApironeError::InvalidArgument(reason.clone())),
        RequestOptions::Raw(raw) => return Ok(raw.clone()),
        RequestOptions::Map(map) if map.is_empty() => return Ok(String::new()),
        RequestOptions::Map(map) => map,
    };

    match mode {
        EncodeMode::JsonBody => Ok(serde_json::to_string(map)?),
        EncodeMode::Query => query_string(map),
    }
}

/// Build a form-encoded query string from a JSON object.
///
/// Nested values flatten into bracketed keys, booleans become `1`/`0` and
/// nulls are skipped.
fn query_string(map: &Map<String, Value>) -> Result<String, ApironeError> {
    let mut pairs = Vec::new();
    for (key, value) in map {
        flatten(key.clone(), value, &mut pairs);
    }
    serde_urlencoded::to_string(&pairs).map_err(|e| ApironeError::Encode(e.to_string()))
}

fn flatten(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{key}[{index}]"), item, pairs);
            }
        }
        Value::Object(object) => {
            for (sub, item) in object {
                flatten(format!("{key}[{sub}]"), item, pairs);
            }
        }
    }
}
