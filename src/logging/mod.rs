//! Audit logging of API exchanges.
//!
//! A client can be given a [`LogSink`]; every completed exchange is then
//! reported to it once, with credentials masked. Without a sink nothing is
//! recorded.
//!
//! ```rust,no_run
//! use apirone_api_client::ApironeClient;
//!
//! # fn main() -> Result<(), apirone_api_client::ApironeError> {
//! let client = ApironeClient::builder()
//!     .logger_fn(|level, message, context| {
//!         eprintln!("[{level}] {message} {context:?}");
//!         Ok(())
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod audit;
pub mod mask;

pub use audit::AuditLogger;

use serde::Serialize;
use serde_json::{Map, Value};

/// Structured context attached to a log record.
pub type LogContext = Map<String, Value>;

/// Error returned by a failing sink.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Severity of a log record (PSR-3 levels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// System is unusable
    Emergency,
    /// Action must be taken immediately
    Alert,
    /// Critical conditions
    Critical,
    /// Runtime errors
    Error,
    /// Exceptional occurrences that are not errors
    Warning,
    /// Normal but significant events
    Notice,
    /// Interesting events
    Info,
    /// Detailed debug information
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Emergency => "emergency",
            LogLevel::Alert => "alert",
            LogLevel::Critical => "critical",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        write!(f, "{}", s)
    }
}

/// Receiver of audit records.
///
/// Implement this for a logger object, or pass a closure through
/// [`FnSink`] / [`crate::ApironeClientBuilder::logger_fn`].
pub trait LogSink: Send + Sync {
    /// Record one message.
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) -> Result<(), SinkError>;
}

/// Adapter turning a closure into a [`LogSink`].
pub struct FnSink<F>(pub F);

impl<F> LogSink for FnSink<F>
where
    F: Fn(LogLevel, &str, &LogContext) -> Result<(), SinkError> + Send + Sync,
{
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) -> Result<(), SinkError> {
        (self.0)(level, message, context)
    }
}

/// Sink that forwards records to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) -> Result<(), SinkError> {
        let context = Value::Object(context.clone());
        match level {
            LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical | LogLevel::Error => {
                tracing::error!(target: "apirone_api_client::audit", %context, "{}", message)
            }
            LogLevel::Warning => {
                tracing::warn!(target: "apirone_api_client::audit", %context, "{}", message)
            }
            LogLevel::Notice | LogLevel::Info => {
                tracing::info!(target: "apirone_api_client::audit", %context, "{}", message)
            }
            LogLevel::Debug => {
                tracing::debug!(target: "apirone_api_client::audit", %context, "{}", message)
            }
        }
        Ok(())
    }
}

/// What to do when the sink itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkFailurePolicy {
    /// Report the failure through `tracing` and carry on with the request
    #[default]
    Ignore,
    /// Fail an otherwise successful request with [`crate::ApironeError::LogSink`]
    Propagate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(LogLevel::Error.to_string(), "error");
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(serde_json::to_value(LogLevel::Warning).unwrap(), "warning");
    }

    #[test]
    fn test_fn_sink_forwards() {
        let sink = FnSink(
            |level: LogLevel, message: &str, _context: &LogContext| -> Result<(), SinkError> {
                if level == LogLevel::Error {
                    Err(message.to_string().into())
                } else {
                    Ok(())
                }
            },
        );
        assert!(sink.log(LogLevel::Info, "ok", &LogContext::new()).is_ok());
        let err = sink.log(LogLevel::Error, "boom", &LogContext::new()).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_tracing_sink_never_fails() {
        assert!(TracingSink.log(LogLevel::Critical, "x", &LogContext::new()).is_ok());
    }
}
