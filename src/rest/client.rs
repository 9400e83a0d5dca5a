//! Apirone REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, ACCEPT_CHARSET, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ApironeError;
use crate::logging::{AuditLogger, FnSink, LogContext, LogLevel, LogSink, SinkError, SinkFailurePolicy};
use crate::rest::classify::classify;
use crate::rest::encode::{EncodeMode, encode};
use crate::rest::endpoints::APIRONE_BASE_URL;
use crate::rest::transport::{
    DEFAULT_TIMEOUT, HttpTransport, ReqwestTransport, TransportConfig, TransportRequest,
};
use crate::rest::{Exchange, RequestOptions};

/// The Apirone REST API client.
///
/// Every call goes through [`ApironeClient::request`], which encodes the
/// options, sends the request, reports the exchange to the configured log
/// sink, maps error statuses to typed errors and decodes the JSON body.
/// Nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use apirone_api_client::ApironeClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ApironeClient::new()?;
///
///     let ticker = client.ticker(Some("btc"), Some("usd")).await?;
///     println!("BTC/USD: {}", ticker);
///
///     Ok(())
/// }
/// ```
///
/// Protected endpoints need a transfer key or an access token on the
/// resource handle:
///
/// ```rust,no_run
/// use apirone_api_client::ApironeClient;
/// use apirone_api_client::types::TransferBuilder;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ApironeClient::new()?;
///     let account = client.account("apr-e729d9982f0ca1d2f1a3a2c4e1a2f7a9").transfer_key("key");
///
///     let transfer = TransferBuilder::new().add_destination("3N2aXAebXqvV8TDXBabm9ydr2gXR6Q5xNd", "10000")?;
///     let result = account.transfer("btc", transfer).await?;
///     println!("{}", result);
///
///     Ok(())
/// }
/// ```
pub struct ApironeClient<T = ReqwestTransport> {
    transport: Arc<T>,
    base_url: String,
    user_agent: HeaderValue,
    audit: AuditLogger,
}

impl ApironeClient<ReqwestTransport> {
    /// Create a new client with default settings.
    pub fn new() -> Result<Self, ApironeError> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ApironeClientBuilder {
        ApironeClientBuilder::new()
    }
}

impl<T: HttpTransport> ApironeClient<T> {
    /// The base URL every path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one API call.
    ///
    /// GET options become the query string, POST and PATCH options a JSON
    /// body; OPTIONS and other methods send neither. Headers given here
    /// override the defaults.
    pub async fn request<R>(
        &self,
        method: Method,
        path: &str,
        options: impl Into<RequestOptions>,
        headers: HeaderMap,
    ) -> Result<R, ApironeError>
    where
        R: DeserializeOwned,
    {
        let options = options.into();
        if let RequestOptions::Invalid(reason) = &options {
            return Err(ApironeError::InvalidArgument(reason.clone()));
        }

        let mut url = format!("{}{}", self.base_url, path);
        let body = if method == Method::GET {
            let query = encode(&options, EncodeMode::Query)?;
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
            None
        } else if method == Method::POST || method == Method::PATCH {
            Some(encode(&options, EncodeMode::JsonBody)?).filter(|body| !body.is_empty())
        } else {
            None
        };
        let url = Url::parse(&url)?;
        let headers = self.request_headers(headers, body.is_some());

        let mut exchange = Exchange::new(
            method.clone(),
            path,
            url.clone(),
            headers.clone(),
            options,
            body.clone().unwrap_or_default(),
        );

        tracing::debug!(%method, path, "sending Apirone API request");
        let response = self
            .transport
            .send(TransportRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .inspect_err(|e| tracing::debug!(error = %e, path, "transport failure"))?;
        exchange.complete(response);

        let outcome = classify(&exchange);
        let logged = self.audit.record(&exchange, &outcome);
        outcome?;
        logged?;

        decode(&exchange.response_body)
    }

    /// GET `path` with query options.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<R, ApironeError> {
        self.request(Method::GET, path, options, HeaderMap::new()).await
    }

    /// POST `path` with a JSON body.
    pub async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<R, ApironeError> {
        self.request(Method::POST, path, options, HeaderMap::new()).await
    }

    /// PATCH `path` with a JSON body.
    pub async fn patch<R: DeserializeOwned>(
        &self,
        path: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<R, ApironeError> {
        self.request(Method::PATCH, path, options, HeaderMap::new()).await
    }

    /// OPTIONS `path`, the API's service information verb.
    pub async fn options<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApironeError> {
        self.request(Method::OPTIONS, path, (), HeaderMap::new()).await
    }

    fn request_headers(&self, caller: HeaderMap, has_body: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for name in caller.keys() {
            headers.remove(name);
        }
        headers.extend(caller);
        headers
    }
}

/// Decode a successful response body.
///
/// An empty, `null` or malformed body is a decode failure, never a default value.
fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApironeError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ApironeError::Decode {
        detail: e.to_string(),
    })?;
    if value.is_null() {
        return Err(ApironeError::Decode {
            detail: "response body is null".to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| ApironeError::Decode {
        detail: e.to_string(),
    })
}

impl<T> Clone for ApironeClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            audit: self.audit.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ApironeClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApironeClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("audit", &self.audit)
            .finish()
    }
}

/// Builder for [`ApironeClient`].
pub struct ApironeClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    proxy: Option<String>,
    connect_timeout: Duration,
    timeout: Duration,
    sink: Option<Arc<dyn LogSink>>,
    sink_failure_policy: SinkFailurePolicy,
}

impl ApironeClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: APIRONE_BASE_URL.to_string(),
            user_agent: None,
            proxy: None,
            connect_timeout: DEFAULT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            sink: None,
            sink_failure_policy: SinkFailurePolicy::default(),
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Append a suffix to the default user agent.
    pub fn user_agent(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent = Some(suffix.into());
        self
    }

    /// Route requests through a forward proxy (`host:port` or a proxy URL).
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Report every exchange to a log sink.
    pub fn logger(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Report every exchange to a closure.
    pub fn logger_fn<F>(self, f: F) -> Self
    where
        F: Fn(LogLevel, &str, &LogContext) -> Result<(), SinkError> + Send + Sync + 'static,
    {
        self.logger(FnSink(f))
    }

    /// Decide whether sink failures fail the request.
    pub fn sink_failure_policy(mut self, policy: SinkFailurePolicy) -> Self {
        self.sink_failure_policy = policy;
        self
    }

    /// Build the client with the reqwest transport.
    pub fn build(self) -> Result<ApironeClient, ApironeError> {
        let transport = ReqwestTransport::new(&TransportConfig {
            connect_timeout: self.connect_timeout,
            timeout: self.timeout,
            proxy: self.proxy.clone(),
        })?;
        self.build_with_transport(transport)
    }

    /// Build the client around a custom transport.
    ///
    /// Timeouts and proxy settings are the transport's concern and are not
    /// applied.
    pub fn build_with_transport<T: HttpTransport>(
        self,
        transport: T,
    ) -> Result<ApironeClient<T>, ApironeError> {
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Url::parse(&base_url)?;

        let user_agent = match &self.user_agent {
            Some(suffix) => format!("{} {}", default_user_agent(), suffix),
            None => default_user_agent(),
        };
        let user_agent = HeaderValue::from_str(&user_agent)
            .map_err(|e| ApironeError::InvalidArgument(format!("invalid user agent: {e}")))?;

        Ok(ApironeClient {
            transport: Arc::new(transport),
            base_url,
            user_agent,
            audit: AuditLogger::new(self.sink, self.sink_failure_policy),
        })
    }
}

impl Default for ApironeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_user_agent() -> String {
    format!("apirone-api-client/{}", env!("CARGO_PKG_VERSION"))
}
