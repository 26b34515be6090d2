//! Error types for the WaniKani API client
//!
//! Every public API returns `Result<T, Error>`. The variants follow the
//! failure stages of a request: configuration, transport, API status,
//! decoding, and pagination.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP transport failed ({kind}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error(transparent)]
    Api(#[from] ApiError),

    // ============================================================================
    // Encoding / Decoding Errors
    // ============================================================================
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: DecodeContext,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected object type '{actual}', expected one of [{expected}]")]
    UnexpectedObjectType { expected: String, actual: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a transport error without an underlying `reqwest` error
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api(ApiError {
            status,
            message: message.into(),
        })
    }

    /// Create a decode error
    pub fn decode(context: DecodeContext, source: serde_json::Error) -> Self {
        Self::Decode { context, source }
    }

    /// Status code of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Check if this error is retryable
    ///
    /// Only API errors with status 429, 500 or 503 and transport failures
    /// outside the fatal kinds are retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { kind, .. } => kind.is_retryable(),
            Error::Api(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// API Error
// ============================================================================

/// An error returned by the API with a non-200/304 status
///
/// The wire shape is `{"code": 401, "error": "Unauthorized..."}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("API error {status}: {message}")]
pub struct ApiError {
    /// HTTP status code reported by the API
    pub status: u16,
    /// Error message reported by the API
    pub message: String,
}

impl ApiError {
    /// Check if the status is one the retry loop rides out
    pub fn is_retryable(&self) -> bool {
        is_retryable_status(self.status)
    }
}

/// Wire form of an API error body
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Convert into an `ApiError`, falling back to the HTTP status when the
    /// body carries no code
    pub(crate) fn into_api_error(self, http_status: u16) -> ApiError {
        ApiError {
            status: self.code.unwrap_or(http_status),
            message: self.error.unwrap_or_default(),
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 503)
}

// ============================================================================
// Transport Error Kinds
// ============================================================================

/// Structured classification of transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Could not connect (DNS, refused, reset)
    Connect,
    /// The transport's timeout or the caller's deadline elapsed
    Timeout,
    /// The redirect policy gave up
    TooManyRedirects,
    /// URL scheme other than http/https
    UnsupportedScheme,
    /// The server certificate was not signed by a trusted authority
    CertificateAuthority,
    /// The request could not be built
    InvalidRequest,
    /// The response body could not be read
    Body,
    /// Anything else
    Other,
}

impl TransportErrorKind {
    /// Whether a failure of this kind may succeed on a later attempt
    pub fn is_retryable(self) -> bool {
        !matches!(
            self,
            Self::TooManyRedirects
                | Self::UnsupportedScheme
                | Self::CertificateAuthority
                | Self::InvalidRequest
        )
    }

    /// Stable name for logs and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::TooManyRedirects => "too_many_redirects",
            Self::UnsupportedScheme => "unsupported_scheme",
            Self::CertificateAuthority => "certificate_authority",
            Self::InvalidRequest => "invalid_request",
            Self::Body => "body",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Decode Context
// ============================================================================

/// Which body failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeContext {
    /// A 200 response body
    Response,
    /// The body of a non-200/304 response
    ErrorBody,
}

impl fmt::Display for DecodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response => f.write_str("response"),
            Self::ErrorBody => f.write_str("error response"),
        }
    }
}

// ============================================================================
// Pagination Errors
// ============================================================================

/// A next-page URL that could not be turned into a cursor
#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("error parsing next page URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("error parsing next page query string of '{url}': {message}")]
    InvalidQuery { url: String, message: String },

    #[error("no `page_after_id` in next page query string of '{url}'")]
    MissingCursor { url: String },

    #[error("couldn't parse `page_after_id` value '{value}' in '{url}': {source}")]
    InvalidCursor {
        url: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
