//! Serde helpers for the formats the Apirone API expects.

use std::fmt::Display;

use serde::Serializer;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Join items with commas, as in the `addresses` and estimation `destinations` options.
pub fn comma_join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a search filter (`key:value,key:value`) as used by the `q` option.
///
/// Returns `None` when no filter is set, so the option can be skipped.
pub fn search_filter(parts: &[(&str, Option<String>)]) -> Option<String> {
    let parts: Vec<String> = parts
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}:{v}")))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(","))
    }
}

/// Format a timestamp as RFC 3339.
///
/// Fails for timestamps RFC 3339 can not represent (years outside 0..=9999).
pub fn rfc3339(timestamp: &OffsetDateTime) -> Result<String, time::error::Format> {
    timestamp.format(&Rfc3339)
}

/// Serialize an optional timestamp as RFC 3339.
pub mod rfc3339_option {
    use super::*;

    /// Serialize `Some` as an RFC 3339 string and `None` as null.
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => {
                let text = rfc3339(timestamp).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_none(),
        }
    }
}
