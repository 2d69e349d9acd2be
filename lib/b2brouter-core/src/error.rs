//! Error types for the B2BRouter client.
//!
//! Failures fall into three disjoint families:
//! - [`Error::Api`] - the server answered with a status of 400 or above. The
//!   attached [`ApiError`] carries exactly one [`ApiErrorKind`].
//! - transport failures ([`Error::Connection`], [`Error::Tls`],
//!   [`Error::Timeout`]) - no HTTP response was received at all.
//! - local failures (validation, serialization, configuration) - reported
//!   before anything is sent.

use std::collections::HashMap;

use bytes::Bytes;
use derive_more::{Display, Error, From};
use serde_json::Value;

// ============================================================================
// API Error Taxonomy
// ============================================================================

/// Kind of failure reported by the API, chosen from the HTTP status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ApiErrorKind {
    /// 400 or 422: the request was malformed or failed validation.
    #[display("invalid request")]
    InvalidRequest,
    /// 401: missing or wrong API key.
    #[display("authentication failed")]
    Authentication,
    /// 403: the API key may not access this resource.
    #[display("permission denied")]
    Permission,
    /// 404: the resource (or the requested document format) does not exist.
    #[display("resource not found")]
    NotFound,
    /// Any other status of 400 or above.
    #[display("API error")]
    Api,
}

impl ApiErrorKind {
    /// Statuses with a dedicated kind. Anything else at or above 400 is [`ApiErrorKind::Api`].
    pub const STATUS_TABLE: [(u16, Self); 5] = [
        (400, Self::InvalidRequest),
        (422, Self::InvalidRequest),
        (401, Self::Authentication),
        (403, Self::Permission),
        (404, Self::NotFound),
    ];

    /// Select the error kind for a status code.
    ///
    /// Returns `None` for statuses below 400, which are successes.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        if status < 400 {
            return None;
        }
        Some(
            Self::STATUS_TABLE
                .iter()
                .find(|(code, _)| *code == status)
                .map_or(Self::Api, |(_, kind)| *kind),
        )
    }
}

/// Failure response returned by the B2BRouter API.
///
/// Keeps everything the server sent so callers can branch on details without
/// re-reading the body.
#[derive(Debug, Clone, Display, Error)]
#[display("{kind} (HTTP {status}): {message}")]
pub struct ApiError {
    pub(crate) kind: ApiErrorKind,
    pub(crate) message: String,
    pub(crate) status: u16,
    pub(crate) body: Bytes,
    pub(crate) json_body: Option<Value>,
    pub(crate) headers: HashMap<String, String>,
}

impl ApiError {
    /// Error kind.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Human-readable message extracted from the response.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Raw response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Response body decoded as JSON, when it was valid JSON.
    #[must_use]
    pub const fn json_body(&self) -> Option<&Value> {
        self.json_body.as_ref()
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single response header by name, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decode the raw body into a caller-defined error type.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not deserialize into `T`.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        crate::from_json(&self.body)
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for B2BRouter operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The API answered with a status of 400 or above.
    #[display("{_0}")]
    #[from]
    Api(#[error(not(source))] ApiError),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The request was rejected locally before being sent.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    Validation(#[error(not(source))] String),

    /// Client configuration is missing or invalid.
    #[display("configuration error: {_0}")]
    #[from(skip)]
    Config(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "invoice.contact.name").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a local validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The API error, if the server answered with a failure status.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            _ => None,
        }
    }

    /// The API error kind, if the server answered with a failure status.
    #[must_use]
    pub const fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(api) => Some(api.kind),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status),
            _ => None,
        }
    }

    /// Returns `true` if no HTTP response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the API reported the resource as not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ApiErrorKind::NotFound)
    }

    /// Returns the response body if this is an API error.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.api_error().map(ApiError::body)
    }

    /// Returns the decoded JSON body if this is an API error with a JSON body.
    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        self.api_error().and_then(ApiError::json_body)
    }

    /// Try to decode the API error body into a caller-defined type.
    ///
    /// Returns `None` if this is not an API error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.api_error().map(ApiError::decode_body)
    }
}
