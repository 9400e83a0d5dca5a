//! Error types for the Apirone client library.

use thiserror::Error;

use crate::rest::TransportError;

/// The main error type for all Apirone client operations.
#[derive(Error, Debug)]
pub enum ApironeError {
    /// An endpoint that requires authorization was called without a token or transfer key
    #[error("Credentials not set: a token or transfer key is required for this endpoint")]
    CredentialsNotSet,

    /// The request never completed (DNS, refused connection, TLS, timeout)
    #[error("{0}")]
    Transport(TransportError),

    /// 400 Bad Request
    #[error("Validation failed: {0}")]
    ValidationFailed(ApiError),

    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(ApiError),

    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(ApiError),

    /// 404 Not Found
    #[error("Not found: {0}")]
    NotFound(ApiError),

    /// 405 Method Not Allowed
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(ApiError),

    /// 500 Internal Server Error
    #[error("Internal server error: {0}")]
    InternalServerError(ApiError),

    /// Any other HTTP error status
    #[error("Apirone API error: {0}")]
    Api(ApiError),

    /// A successful response body could not be decoded
    #[error("Failed to decode JSON: {detail}")]
    Decode {
        /// Parser error detail
        detail: String,
    },

    /// JSON serialization error while preparing a request
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Request options could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// A caller-supplied value was rejected before sending
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The audit log sink failed and the client is configured to propagate sink failures
    #[error("Log sink failed: {0}")]
    LogSink(String),
}

impl ApironeError {
    /// The classified kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApironeError::CredentialsNotSet => ErrorKind::CredentialsNotSet,
            ApironeError::Transport(_) => ErrorKind::TransportFailure,
            ApironeError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            ApironeError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApironeError::Forbidden(_) => ErrorKind::Forbidden,
            ApironeError::NotFound(_) => ErrorKind::NotFound,
            ApironeError::MethodNotAllowed(_) => ErrorKind::MethodNotAllowed,
            ApironeError::InternalServerError(_) => ErrorKind::InternalServerError,
            ApironeError::Api(_) => ErrorKind::Generic,
            ApironeError::Decode { .. } => ErrorKind::DecodeFailure,
            ApironeError::Json(_)
            | ApironeError::Url(_)
            | ApironeError::Encode(_)
            | ApironeError::InvalidArgument(_)
            | ApironeError::LogSink(_) => ErrorKind::Local,
        }
    }

    /// The API error carried by this error, if the server answered with an error status.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ApironeError::ValidationFailed(e)
            | ApironeError::Unauthorized(e)
            | ApironeError::Forbidden(e)
            | ApironeError::NotFound(e)
            | ApironeError::MethodNotAllowed(e)
            | ApironeError::InternalServerError(e)
            | ApironeError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status code, absent for errors raised before or outside an HTTP exchange.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }
}

impl From<ApiError> for ApironeError {
    fn from(error: ApiError) -> Self {
        match error.kind() {
            ErrorKind::ValidationFailed => ApironeError::ValidationFailed(error),
            ErrorKind::Unauthorized => ApironeError::Unauthorized(error),
            ErrorKind::Forbidden => ApironeError::Forbidden(error),
            ErrorKind::NotFound => ApironeError::NotFound(error),
            ErrorKind::MethodNotAllowed => ApironeError::MethodNotAllowed(error),
            ErrorKind::InternalServerError => ApironeError::InternalServerError(error),
            _ => ApironeError::Api(error),
        }
    }
}

impl From<TransportError> for ApironeError {
    fn from(error: TransportError) -> Self {
        ApironeError::Transport(error)
    }
}

/// Closed taxonomy of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No token or transfer key on a resource that needs one
    CredentialsNotSet,
    /// Network-level failure, no HTTP status
    TransportFailure,
    /// 400
    ValidationFailed,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 500
    InternalServerError,
    /// Any other status >= 400
    Generic,
    /// Malformed or empty JSON in a successful response
    DecodeFailure,
    /// Failure in local input handling (URL, encoding, arguments, log sink)
    Local,
}

impl ErrorKind {
    /// Map an HTTP status to its kind, or `None` for non-error statuses.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            0..400 => None,
            400 => Some(ErrorKind::ValidationFailed),
            401 => Some(ErrorKind::Unauthorized),
            403 => Some(ErrorKind::Forbidden),
            404 => Some(ErrorKind::NotFound),
            405 => Some(ErrorKind::MethodNotAllowed),
            500 => Some(ErrorKind::InternalServerError),
            _ => Some(ErrorKind::Generic),
        }
    }
}

/// An error status returned by the Apirone API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// The `message` field of the error body, or the raw body text
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {})", self.message, self.status)
    }
}

impl ApiError {
    /// Create a new API error from status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The classified kind of this status.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_status(self.status).unwrap_or(ErrorKind::Generic)
    }
}
