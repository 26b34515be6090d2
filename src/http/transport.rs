//! Transport seam
//!
//! The engine hands a fully-built [`TransportRequest`] to a [`Transport`]
//! and gets back raw status, headers and body. [`ReqwestTransport`] talks to
//! the network; [`RecordingTransport`] logs requests and replays seeded
//! responses so the rest of the client can be tested offline.

use crate::error::{Error, Result, TransportErrorKind};
use crate::types::Method;
use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// A request ready to send
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Fully-qualified URL including the query string
    pub url: String,
    /// Server-relative path, without query
    pub path: String,
    /// Encoded query string, possibly empty
    pub query: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Timeout for this attempt
    pub timeout: Option<Duration>,
}

/// Raw response from a transport
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Sends one request attempt
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a single HTTP exchange
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

// ============================================================================
// Live transport
// ============================================================================

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with the given user agent and default timeout
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(classify_reqwest_error)?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut req = self
            .client
            .request(request.method.into(), &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            req = req.body(body);
        }
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify_reqwest_error)?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// Error classification
// ============================================================================

// reqwest has no structured signal for these two; match over the source chain.
static CERTIFICATE_AUTHORITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(unknown ?issuer|unknown ?ca\b|certificate verify failed|self[- ]signed certificate|invalid peer certificate)")
        .expect("valid regex")
});

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(url scheme is not allowed|unsupported protocol scheme)").expect("valid regex"));

/// Map a `reqwest` error to a transport error with a structured kind
pub(crate) fn classify_reqwest_error(err: reqwest::Error) -> Error {
    let chain = error_chain_text(&err);
    let kind = classify(&err, &chain);
    Error::Transport {
        kind,
        message: chain,
        source: Some(err),
    }
}

fn classify(err: &reqwest::Error, chain: &str) -> TransportErrorKind {
    if err.is_redirect() {
        return TransportErrorKind::TooManyRedirects;
    }
    if err.is_timeout() {
        return TransportErrorKind::Timeout;
    }
    if SCHEME_RE.is_match(chain) {
        return TransportErrorKind::UnsupportedScheme;
    }
    if CERTIFICATE_AUTHORITY_RE.is_match(chain) {
        return TransportErrorKind::CertificateAuthority;
    }
    if err.is_builder() {
        return TransportErrorKind::InvalidRequest;
    }
    if err.is_connect() {
        return TransportErrorKind::Connect;
    }
    if err.is_body() || err.is_decode() {
        return TransportErrorKind::Body;
    }
    TransportErrorKind::Other
}

fn error_chain_text(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

// ============================================================================
// Recording transport
// ============================================================================

/// A request captured in record mode
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    /// Request body; `None` when no body was sent
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Body as UTF-8 text, empty when absent
    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }

    /// Header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A response seeded for record mode
#[derive(Debug, Clone)]
pub enum RecordedResponse {
    /// Reply with this status, headers and body
    Reply {
        status: u16,
        headers: HeaderMap,
        body: Bytes,
    },
    /// Fail the attempt at the transport level
    Failure {
        kind: TransportErrorKind,
        message: String,
    },
}

impl RecordedResponse {
    /// A 200 with the given JSON body
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::status(200, body)
    }

    /// A reply with the given status and body
    pub fn status(status: u16, body: impl Into<Bytes>) -> Self {
        Self::Reply {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// A 304 with no body
    pub fn not_modified() -> Self {
        Self::status(304, Bytes::new())
    }

    /// A transport-level failure
    pub fn failure(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Add a response header; ignored for failures and invalid names/values
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let Self::Reply { headers, .. } = &mut self {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
        self
    }
}

/// Offline transport that records every attempt
///
/// Each attempt consumes one seeded response. When none are left it answers
/// 200 with `{}`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<RecordedResponse>>,
}

impl RecordingTransport {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a response for a future attempt
    pub fn push_response(&self, response: RecordedResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Seed several responses in order
    pub fn extend_responses(&self, responses: impl IntoIterator<Item = RecordedResponse>) {
        lock(&self.responses).extend(responses);
    }

    /// Snapshot of recorded requests
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of recorded attempts
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Seeded responses not yet consumed
    pub fn pending_responses(&self) -> usize {
        lock(&self.responses).len()
    }

    /// Drop all recorded requests and seeded responses
    pub fn clear(&self) {
        lock(&self.requests).clear();
        lock(&self.responses).clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            path: request.path,
            query: request.query,
            headers: request.headers,
            body: request.body,
        });

        match lock(&self.responses).pop_front() {
            Some(RecordedResponse::Reply {
                status,
                headers,
                body,
            }) => Ok(TransportResponse {
                status,
                headers,
                body: if body.is_empty() && status != 304 {
                    Bytes::from_static(b"{}")
                } else {
                    body
                },
            }),
            Some(RecordedResponse::Failure { kind, message }) => {
                Err(Error::transport(kind, message))
            }
            None => Ok(TransportResponse {
                status: 200,
                headers: HeaderMap::new(),
                body: Bytes::from_static(b"{}"),
            }),
        }
    }
}

// A panic while holding the lock leaves plain data behind; keep using it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
