//! Credential masking for audit records.
//!
//! Every function here works on a copy; the request that goes out is never
//! touched.

use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde_json::{Map, Value};

use crate::auth::TRANSFER_KEY;
use crate::rest::RequestOptions;
use crate::rest::exchange::{HeaderEntry, header_entries};

/// Replacement for masked values.
pub const PLACEHOLDER: &str = "[REDACTED]";

/// Option keys whose values never reach a sink.
pub const MASKED_KEYS: &[&str] = &[TRANSFER_KEY, "password", "access-token", "refresh-token"];

fn is_masked(key: &str) -> bool {
    MASKED_KEYS.contains(&key)
}

/// Mask every secret value (see [`MASKED_KEYS`]) in a JSON value, at any depth.
pub fn mask_value(value: &mut Value) {
    match value {
        Value::Object(map) => mask_map(map),
        Value::Array(items) => items.iter_mut().for_each(mask_value),
        _ => {}
    }
}

fn mask_map(map: &mut Map<String, Value>) {
    for (key, value) in map.iter_mut() {
        if is_masked(key) {
            *value = Value::String(PLACEHOLDER.to_string());
        } else {
            mask_value(value);
        }
    }
}

/// Masked copy of request options.
pub fn mask_options(options: &RequestOptions) -> RequestOptions {
    match options {
        RequestOptions::Map(map) => {
            let mut masked = map.clone();
            mask_map(&mut masked);
            RequestOptions::Map(masked)
        }
        RequestOptions::Raw(raw) => RequestOptions::Raw(mask_encoded(raw)),
        RequestOptions::Invalid(reason) => RequestOptions::Invalid(reason.clone()),
    }
}

/// Masked copy of an encoded payload, either JSON or a query string.
///
/// Text that is neither, or that holds no secret, is returned as is.
pub fn mask_encoded(text: &str) -> String {
    if let Ok(mut value) = serde_json::from_str::<Value>(text) {
        mask_value(&mut value);
        return value.to_string();
    }
    if !MASKED_KEYS.iter().any(|key| text.contains(*key)) {
        return text.to_string();
    }
    match serde_urlencoded::from_str::<Vec<(String, String)>>(text) {
        Ok(pairs) => {
            let masked: Vec<(String, String)> = pairs
                .into_iter()
                .map(|(key, value)| {
                    if is_masked(&key) {
                        (key, PLACEHOLDER.to_string())
                    } else {
                        (key, value)
                    }
                })
                .collect();
            serde_urlencoded::to_string(&masked).unwrap_or_else(|_| PLACEHOLDER.to_string())
        }
        Err(_) => PLACEHOLDER.to_string(),
    }
}

/// Request headers as a JSON object with the `Authorization` value masked.
pub fn mask_headers(headers: &HeaderMap) -> Map<String, Value> {
    header_entries(headers)
        .into_iter()
        .map(|(name, entry)| {
            let value = if name == AUTHORIZATION.as_str() {
                Value::String(format!("Bearer {PLACEHOLDER}"))
            } else {
                entry_to_value(entry)
            };
            (name, value)
        })
        .collect()
}

fn entry_to_value(entry: HeaderEntry) -> Value {
    match entry {
        HeaderEntry::Single(value) => Value::String(value),
        HeaderEntry::Multiple(values) => Value::Array(values.into_iter().map(Value::String).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_mask_options_is_a_copy() {
        let mut map = Map::new();
        map.insert("currency".to_string(), json!("btc"));
        map.insert(TRANSFER_KEY.to_string(), json!("secret-key"));
        let options = RequestOptions::Map(map);

        let masked = mask_options(&options);

        let RequestOptions::Map(masked) = masked else {
            panic!("expected map options");
        };
        assert_eq!(masked.get(TRANSFER_KEY), Some(&json!(PLACEHOLDER)));
        assert_eq!(masked.get("currency"), Some(&json!("btc")));
        let RequestOptions::Map(original) = options else {
            panic!("expected map options");
        };
        assert_eq!(original.get(TRANSFER_KEY), Some(&json!("secret-key")));
    }

    #[test]
    fn test_mask_nested_response() {
        let mut value = json!({"account": "apr-1", "nested": [{"transfer-key": "k"}]});
        mask_value(&mut value);
        assert_eq!(value["nested"][0][TRANSFER_KEY], json!(PLACEHOLDER));
        assert_eq!(value["account"], json!("apr-1"));
    }

    #[test]
    fn test_mask_encoded_json() {
        let masked = mask_encoded(r#"{"transfer-key":"secret","currency":"btc"}"#);
        assert!(!masked.contains("secret"));
        assert!(masked.contains(PLACEHOLDER));
        assert!(masked.contains("btc"));
    }

    #[test]
    fn test_mask_encoded_query() {
        let masked = mask_encoded("currency=btc&transfer-key=secret");
        assert!(!masked.contains("secret"));
        assert!(masked.contains("currency=btc"));
        assert!(masked.contains("transfer-key=%5BREDACTED%5D"));
    }

    #[test]
    fn test_mask_login_password() {
        let masked = mask_encoded(r#"{"login":"apr-1","password":"hunter2"}"#);
        assert!(!masked.contains("hunter2"));
        assert!(masked.contains("apr-1"));

        let mut response = json!({
            "access-token": "jwt-access",
            "refresh-token": "jwt-refresh",
            "expires-in": 900
        });
        mask_value(&mut response);
        assert_eq!(response["access-token"], json!(PLACEHOLDER));
        assert_eq!(response["refresh-token"], json!(PLACEHOLDER));
        assert_eq!(response["expires-in"], json!(900));
    }

    #[test]
    fn test_mask_encoded_untouched() {
        assert_eq!(mask_encoded("currency=btc"), "currency=btc");
        assert_eq!(mask_encoded(""), "");
    }

    #[test]
    fn test_mask_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer jwt-token"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let masked = mask_headers(&headers);
        assert_eq!(masked["authorization"], json!("Bearer [REDACTED]"));
        assert_eq!(masked["accept"], json!("application/json"));
    }
}
