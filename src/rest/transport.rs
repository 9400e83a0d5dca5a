//! HTTP transport.
//!
//! [`HttpTransport`] is the seam between the request facade and the network.
//! [`ReqwestTransport`] is the production implementation; tests can supply
//! their own to observe or stub exchanges.

use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::error::ApironeError;
use crate::logging::mask::mask_encoded;

/// Default connect and total timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully prepared HTTP request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Full URL, query string included
    pub url: Url,
    /// Headers to send
    pub headers: HeaderMap,
    /// Request payload; `None` sends no body
    pub body: Option<String>,
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body text
    pub body: String,
}

/// Why a request failed below the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorCategory {
    /// DNS failure, refused connection or timeout
    Connectivity,
    /// TLS certificate verification failed
    Certificate,
    /// Anything else
    Unexpected,
}

impl std::fmt::Display for TransportErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransportErrorCategory::Connectivity => "connectivity",
            TransportErrorCategory::Certificate => "certificate",
            TransportErrorCategory::Unexpected => "unexpected",
        };
        write!(f, "{}", s)
    }
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// Failure category
    pub category: TransportErrorCategory,
    /// Underlying error text
    pub detail: String,
}

impl TransportError {
    /// Create a new transport error.
    pub fn new(category: TransportErrorCategory, detail: impl Into<String>) -> Self {
        Self {
            category,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary = match self.category {
            TransportErrorCategory::Connectivity => {
                "Could not connect to Apirone API. Please check your internet connection and try again."
            }
            TransportErrorCategory::Certificate => "Could not verify SSL certificate.",
            TransportErrorCategory::Unexpected => "Unexpected error communicating with Apirone API.",
        };
        write!(f, "{} (Network error: {})", summary, self.detail)
    }
}

impl std::error::Error for TransportError {}

/// Sends prepared requests.
///
/// HTTP error statuses are successful sends; only failures to obtain a
/// response are errors.
pub trait HttpTransport: Send + Sync {
    /// Perform one HTTP exchange.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// Connection settings for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
    /// Time allowed for the whole exchange
    pub timeout: Duration,
    /// Forward proxy, `host:port` or a full proxy URL
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
        }
    }
}

/// reqwest-backed transport with tracing middleware.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http_client: ClientWithMiddleware,
}

impl ReqwestTransport {
    /// Build a transport from connection settings.
    pub fn new(config: &TransportConfig) -> Result<Self, ApironeError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout);

        if let Some(proxy) = &config.proxy {
            let proxy_url = if proxy.contains("://") {
                proxy.clone()
            } else {
                format!("http://{proxy}")
            };
            let proxy = reqwest::Proxy::all(&proxy_url)
                .map_err(|e| ApironeError::InvalidArgument(format!("invalid proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let reqwest_client = builder.build().map_err(|e| {
            ApironeError::InvalidArgument(format!("failed to build HTTP client: {e}"))
        })?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self { http_client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = request.url.clone();
        let mut builder = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| categorize_middleware(e, &url))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| categorize_reqwest(e, &url))?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

fn categorize_middleware(error: reqwest_middleware::Error, url: &Url) -> TransportError {
    match error {
        reqwest_middleware::Error::Reqwest(e) => categorize_reqwest(e, url),
        other => TransportError::new(
            TransportErrorCategory::Unexpected,
            redact_url(&error_chain(&other), url),
        ),
    }
}

fn categorize_reqwest(error: reqwest::Error, url: &Url) -> TransportError {
    let connect_or_timeout = error.is_connect() || error.is_timeout();
    let detail = redact_url(&error_chain(&error.without_url()), url);
    TransportError::new(category(connect_or_timeout, &detail), detail)
}

/// Replace the request URL in error text with a copy whose query is masked.
///
/// The transfer key travels in the query of GET requests.
fn redact_url(detail: &str, url: &Url) -> String {
    let Some(query) = url.query() else {
        return detail.to_string();
    };
    let mut masked = url.clone();
    masked.set_query(Some(&mask_encoded(query)));
    detail.replace(url.as_str(), masked.as_str())
}

/// Pick a category from the connect/timeout flag and the error text.
///
/// TLS verification failures surface as connect errors, so the certificate
/// check comes first.
fn category(connect_or_timeout: bool, detail: &str) -> TransportErrorCategory {
    if detail.to_ascii_lowercase().contains("certificate") {
        TransportErrorCategory::Certificate
    } else if connect_or_timeout {
        TransportErrorCategory::Connectivity
    } else {
        TransportErrorCategory::Unexpected
    }
}

/// Render an error with all of its sources.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
