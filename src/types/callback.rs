//! Callback settings attached to addresses, accounts and wallets.

use serde::Serialize;
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::error::ApironeError;

/// Callback the service calls on incoming payments.
///
/// `data` items are sent back verbatim with every callback, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackBuilder {
    url: Option<String>,
    method: Option<String>,
    data: Vec<(String, Value)>,
}

#[skip_serializing_none]
#[derive(Serialize)]
struct CallbackProjection<'a> {
    url: Option<&'a str>,
    method: Option<&'a str>,
    data: Option<Vec<Map<String, Value>>>,
}

impl CallbackBuilder {
    /// Create an empty callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// HTTP method used for the callback; stored upper-cased.
    pub fn method(mut self, method: impl AsRef<str>) -> Self {
        self.method = Some(method.as_ref().to_uppercase());
        self
    }

    /// Add a data item.
    pub fn data_item(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    /// Remove every data item with the given key.
    pub fn remove_data_item(mut self, key: &str) -> Self {
        self.data.retain(|(k, _)| k != key);
        self
    }

    /// Data items in insertion order.
    pub fn data(&self) -> &[(String, Value)] {
        &self.data
    }

    /// Read a callback from its JSON form, as returned by the callback info
    /// endpoints.
    ///
    /// `data` may be a list of single-key objects or one object.
    pub fn from_json(json: &Value) -> Result<Self, ApironeError> {
        let Value::Object(object) = json else {
            return Err(ApironeError::InvalidArgument(
                "callback must be a JSON object".to_string(),
            ));
        };

        let mut callback = Self::new();
        if let Some(url) = object.get("url").and_then(Value::as_str) {
            callback = callback.url(url);
        }
        if let Some(method) = object.get("method").and_then(Value::as_str) {
            callback = callback.method(method);
        }
        match object.get("data") {
            Some(Value::Array(items)) => {
                for item in items {
                    if let Value::Object(item) = item {
                        for (key, value) in item {
                            callback = callback.data_item(key.clone(), value.clone());
                        }
                    }
                }
            }
            Some(Value::Object(item)) => {
                for (key, value) in item {
                    callback = callback.data_item(key.clone(), value.clone());
                }
            }
            _ => {}
        }
        Ok(callback)
    }

    /// JSON form sent to the API. Unset fields are omitted.
    pub fn to_value(&self) -> Value {
        let data = (!self.data.is_empty()).then(|| {
            self.data
                .iter()
                .map(|(key, value)| {
                    let mut item = Map::new();
                    item.insert(key.clone(), value.clone());
                    item
                })
                .collect::<Vec<_>>()
        });
        let projection = CallbackProjection {
            url: self.url.as_deref(),
            method: self.method.as_deref(),
            data,
        };
        serde_json::to_value(projection).unwrap_or_default()
    }
}

impl From<CallbackBuilder> for Value {
    fn from(callback: CallbackBuilder) -> Self {
        callback.to_value()
    }
}
