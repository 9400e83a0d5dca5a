//! The audit hook invoked by the request facade.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::error::{ApiError, ApironeError};
use crate::logging::mask::{mask_encoded, mask_headers, mask_options, mask_value};
use crate::logging::{LogContext, LogLevel, LogSink, SinkFailurePolicy};
use crate::rest::{Exchange, RequestOptions};

/// Reports completed exchanges to an optional sink.
#[derive(Clone, Default)]
pub struct AuditLogger {
    sink: Option<Arc<dyn LogSink>>,
    policy: SinkFailurePolicy,
}

impl AuditLogger {
    /// Create a logger; `None` disables recording.
    pub fn new(sink: Option<Arc<dyn LogSink>>, policy: SinkFailurePolicy) -> Self {
        Self { sink, policy }
    }

    /// Whether a sink is configured.
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Report one completed exchange.
    ///
    /// Logs at `error` when classification failed and at `info` otherwise.
    /// A sink failure is only returned under [`SinkFailurePolicy::Propagate`].
    pub fn record(
        &self,
        exchange: &Exchange,
        outcome: &Result<(), ApiError>,
    ) -> Result<(), ApironeError> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };

        let (level, message) = match outcome {
            Ok(()) => (
                LogLevel::Info,
                format!(
                    "{} {}: response with code {} received",
                    exchange.method,
                    exchange.path,
                    status_text(exchange)
                ),
            ),
            Err(error) => (
                LogLevel::Error,
                format!(
                    "{} {}: response with code {} received: {}",
                    exchange.method, exchange.path, error.status, error.message
                ),
            ),
        };
        let context = context(exchange);

        match sink.log(level, &message, &context) {
            Ok(()) => Ok(()),
            Err(e) => match self.policy {
                SinkFailurePolicy::Ignore => {
                    tracing::warn!(error = %e, "audit log sink failed");
                    Ok(())
                }
                SinkFailurePolicy::Propagate => Err(ApironeError::LogSink(e.to_string())),
            },
        }
    }
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger")
            .field("enabled", &self.is_enabled())
            .field("policy", &self.policy)
            .finish()
    }
}

fn status_text(exchange: &Exchange) -> String {
    exchange
        .status_code()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// Masked request/response context for one exchange.
fn context(exchange: &Exchange) -> LogContext {
    let mut context = LogContext::new();

    if !exchange.request_options.is_empty() {
        let params = match mask_options(&exchange.request_options) {
            RequestOptions::Map(map) => Value::Object(map),
            RequestOptions::Raw(raw) | RequestOptions::Invalid(raw) => Value::String(raw),
        };
        context.insert("_params".to_string(), params);
    }
    if !exchange.request_body.is_empty() {
        context.insert(
            "_body".to_string(),
            Value::String(mask_encoded(&exchange.request_body)),
        );
    }
    context.insert(
        "_headers".to_string(),
        Value::Object(mask_headers(&exchange.request_headers)),
    );

    let mut response = json!({
        "code": exchange.status_code(),
        "headers": exchange.response_header_map(),
    });
    if !exchange.response_body.is_empty() {
        let body = match serde_json::from_str::<Value>(&exchange.response_body) {
            Ok(mut value) => {
                mask_value(&mut value);
                value
            }
            Err(_) => Value::String(exchange.response_body.clone()),
        };
        response["body"] = body;
    }
    context.insert("_response".to_string(), response);

    context
}
