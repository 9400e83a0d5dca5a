//! Helpers shared by the account and wallet handles.

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};

use crate::auth::Credentials;
use crate::error::ApironeError;
use crate::rest::transport::HttpTransport;
use crate::rest::{ApironeClient, RequestOptions};

/// Turn options into a map and set one key on it.
///
/// Raw options must hold a JSON object for this to succeed.
pub(crate) fn with_option(
    options: impl Into<RequestOptions>,
    key: &str,
    value: impl Into<Value>,
) -> Result<Map<String, Value>, ApironeError> {
    let mut map = options.into().into_map()?;
    map.insert(key.to_string(), value.into());
    Ok(map)
}

/// Perform a call that needs the handle's credentials.
///
/// Missing credentials fail before anything is sent.
pub(crate) async fn authorized<T: HttpTransport>(
    client: &ApironeClient<T>,
    credentials: &Credentials,
    method: Method,
    path: &str,
    options: impl Into<RequestOptions>,
) -> Result<Value, ApironeError> {
    let mut options = options.into().into_map()?;
    let mut headers = HeaderMap::new();
    credentials.apply_auth(&mut options, &mut headers)?;
    client.request(method, path, options, headers).await
}

/// Read `id_key` and an optional `transfer-key` from a saved resource object.
pub(crate) fn parse_saved(
    json: &Value,
    id_key: &str,
) -> Result<(String, Credentials), ApironeError> {
    let id = json
        .get(id_key)
        .and_then(Value::as_str)
        .ok_or_else(|| ApironeError::InvalidArgument(format!("missing \"{id_key}\" field")))?;
    let credentials = match json.get(crate::auth::TRANSFER_KEY).and_then(Value::as_str) {
        Some(key) => Credentials::with_transfer_key(key),
        None => Credentials::new(),
    };
    Ok((id.to_string(), credentials))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_option_on_map_and_raw() {
        let map = with_option((), "currency", "btc").unwrap();
        assert_eq!(map["currency"], json!("btc"));

        let map = with_option(r#"{"limit":5}"#, "currency", "btc").unwrap();
        assert_eq!(map["limit"], json!(5));
        assert!(with_option("limit=5", "currency", "btc").is_err());
    }

    #[test]
    fn test_parse_saved() {
        let (id, credentials) =
            parse_saved(&json!({"account": "apr-1", "transfer-key": "tk"}), "account").unwrap();
        assert_eq!(id, "apr-1");
        assert_eq!(credentials.transfer_key(), Some("tk"));

        let (_, credentials) = parse_saved(&json!({"wallet": "w-1"}), "wallet").unwrap();
        assert!(!credentials.is_set());
        assert!(parse_saved(&json!({}), "wallet").is_err());
    }
}
