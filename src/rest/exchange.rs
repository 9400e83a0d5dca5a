//! One request/response round trip.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use url::Url;

use crate::rest::RequestOptions;
use crate::rest::transport::TransportResponse;

/// A single exchange with the API.
///
/// Created by the request facade for every call. The status and response
/// fields stay empty until the transport completes.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL
    pub path: String,
    /// Full request URL, query string included
    pub url: Url,
    /// Headers sent with the request
    pub request_headers: HeaderMap,
    /// Options as passed by the caller, credentials included
    pub request_options: RequestOptions,
    /// Encoded body, empty when none was sent
    pub request_body: String,
    /// Response status, `None` until completed
    pub status: Option<StatusCode>,
    /// Response headers
    pub response_headers: HeaderMap,
    /// Raw response body
    pub response_body: String,
}

impl Exchange {
    pub(crate) fn new(
        method: Method,
        path: impl Into<String>,
        url: Url,
        request_headers: HeaderMap,
        request_options: RequestOptions,
        request_body: String,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            url,
            request_headers,
            request_options,
            request_body,
            status: None,
            response_headers: HeaderMap::new(),
            response_body: String::new(),
        }
    }

    pub(crate) fn complete(&mut self, response: TransportResponse) {
        self.status = Some(response.status);
        self.response_headers = response.headers;
        self.response_body = response.body;
    }

    /// Status code as a number, if completed.
    pub fn status_code(&self) -> Option<u16> {
        self.status.map(|s| s.as_u16())
    }

    /// Response headers keyed by name; repeated headers keep every value in order.
    pub fn response_header_map(&self) -> BTreeMap<String, HeaderEntry> {
        header_entries(&self.response_headers)
    }
}

/// Value of a header that may have been sent more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderEntry {
    /// Header present once
    Single(String),
    /// Header repeated, in received order
    Multiple(Vec<String>),
}

pub(crate) fn header_entries(headers: &HeaderMap) -> BTreeMap<String, HeaderEntry> {
    let mut entries = BTreeMap::new();
    for name in headers.keys() {
        let mut values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        let entry = if values.len() == 1 {
            HeaderEntry::Single(values.remove(0))
        } else {
            HeaderEntry::Multiple(values)
        };
        entries.insert(name.as_str().to_string(), entry);
    }
    entries
}
