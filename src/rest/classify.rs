//! Response classification.

use serde_json::Value;

use crate::error::ApiError;
use crate::rest::Exchange;

/// Decide whether a completed exchange succeeded.
///
/// Statuses below 400 (and exchanges without a status) are `Ok`. Otherwise
/// the error message is taken from the body's `message` field when the body
/// is a JSON object that has one, and from the raw body text when not.
pub fn classify(exchange: &Exchange) -> Result<(), ApiError> {
    match exchange.status_code() {
        Some(status) if status >= 400 => {
            Err(ApiError::new(status, error_message(&exchange.response_body)))
        }
        _ => Ok(()),
    }
}

/// Extract a human-readable message from an error body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => match object.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}
