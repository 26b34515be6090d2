//! Request execution engine
//!
//! Turns a method, path, parameters and optional body into a decoded
//! resource or a typed error. Handles:
//! - Bearer auth and the API revision header
//! - Conditional requests (`If-None-Match` / `If-Modified-Since`) and 304s
//! - Retries with exponential backoff and jitter
//! - Error body decoding and classification

use super::config::{ClientConfig, WANIKANI_REVISION};
use super::rate_limit::RateLimiter;
use super::transport::{
    RecordedRequest, RecordedResponse, RecordingTransport, ReqwestTransport, Transport,
    TransportRequest, TransportResponse,
};
use crate::error::{ApiErrorBody, DecodeContext, Error, Result, TransportErrorKind};
use crate::object::ApiObject;
use crate::query::RequestParams;
use crate::types::Method;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, ETAG, IF_MODIFIED_SINCE,
    IF_NONE_MATCH, LAST_MODIFIED,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

// Header names are stored lowercase.
const REVISION: HeaderName = HeaderName::from_static("wanikani-revision");

/// WaniKani API client
///
/// Cheap to clone; clones share the transport and rate limiter.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    recorder: Option<Arc<RecordingTransport>>,
    rate_limiter: Option<RateLimiter>,
}

impl Client {
    /// Create a client from config
    ///
    /// In record mode no network transport is built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.record_mode {
            let recorder = Arc::new(RecordingTransport::new());
            let mut client = Self::with_transport(config, recorder.clone());
            client.recorder = Some(recorder);
            return Ok(client);
        }

        let transport = ReqwestTransport::new(&config.user_agent, config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);
        Self {
            config: Arc::new(ClientConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            }),
            transport,
            recorder: None,
            rate_limiter,
        }
    }

    /// The client's configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// The recording transport, in record mode
    pub fn recorder(&self) -> Option<&RecordingTransport> {
        self.recorder.as_deref()
    }

    /// Requests captured in record mode (empty otherwise)
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.recorder().map(RecordingTransport::requests).unwrap_or_default()
    }

    /// Seed a response for record mode; ignored otherwise
    pub fn push_recorded_response(&self, response: RecordedResponse) {
        if let Some(recorder) = self.recorder() {
            recorder.push_response(response);
        }
    }

    /// Make a GET request
    pub async fn get<T, P>(&self, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned + Default + ApiObject,
        P: RequestParams + ?Sized,
    {
        self.execute::<T, P, ()>(Method::Get, path, params, None).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T, P, B>(&self, path: &str, params: &P, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default + ApiObject,
        P: RequestParams + ?Sized,
        B: Serialize + ?Sized,
    {
        self.execute(Method::Post, path, params, Some(body)).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<T, P, B>(&self, path: &str, params: &P, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default + ApiObject,
        P: RequestParams + ?Sized,
        B: Serialize + ?Sized,
    {
        self.execute(Method::Put, path, params, Some(body)).await
    }

    /// Execute a request, retrying transient failures
    ///
    /// `path` is server-relative and must not contain a query string; the
    /// query comes from `params`. The body, if any, is serialized verbatim.
    pub async fn execute<T, P, B>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default + ApiObject,
        P: RequestParams + ?Sized,
        B: Serialize + ?Sized,
    {
        if !self.config.has_token() && !self.config.record_mode {
            return Err(Error::config(
                "an API token must be set to make a live API call",
            ));
        }

        let options = params.options();
        let deadline = options.timeout.map(|t| Instant::now() + t);
        let query = params.encode_to_query();
        let url = self.build_url(path, &query);

        debug!("Requesting URL: {} {} (revision: {})", method, url, WANIKANI_REVISION);

        let body = body
            .map(|b| serde_json::to_vec(b).map(Bytes::from))
            .transpose()
            .map_err(Error::Encode)?;

        let mut request = TransportRequest {
            method,
            url,
            path: path.to_string(),
            query,
            headers: self.build_headers(params, body.is_some())?,
            body,
            timeout: self.config.timeout,
        };

        let max_retries = self.config.max_retries;
        let mut num_retries = 0;

        loop {
            if let Some(deadline) = deadline {
                let remaining = deadline.saturating_duration_since(Instant::now());
                request.timeout = Some(match self.config.timeout {
                    Some(t) => t.min(remaining),
                    None => remaining,
                });
            }

            let err = match self.execute_once::<T>(&request, deadline).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }

            num_retries += 1;
            if num_retries > max_retries {
                return Err(err);
            }

            let delay = backoff_delay(num_retries);
            if deadline.is_some_and(|d| Instant::now() + delay >= d) {
                warn!(
                    "Request failed with retryable error, but backoff of {:?} would pass the deadline: {}",
                    delay, err
                );
                return Err(err);
            }

            warn!(
                "Request failed, retry {}/{} in {:?}: {}",
                num_retries, max_retries, delay, err
            );

            if !self.config.no_retry_sleep {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// One attempt: wait for a permit, send, then interpret the status
    ///
    /// The permit wait counts against the deadline like everything else.
    async fn execute_once<T>(
        &self,
        request: &TransportRequest,
        deadline: Option<Instant>,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default + ApiObject,
    {
        if let Some(ref limiter) = self.rate_limiter {
            match deadline {
                Some(deadline) => {
                    if tokio::time::timeout_at(deadline, limiter.wait()).await.is_err() {
                        return Err(Error::transport(
                            TransportErrorKind::Timeout,
                            "deadline passed while waiting for a rate limit permit",
                        ));
                    }
                }
                None => limiter.wait().await,
            }
        }

        let response = self.transport.send(request.clone()).await?;
        decode_response(response)
    }

    /// Build full URL from path and query
    fn build_url(&self, path: &str, query: &str) -> String {
        let mut url = format!("{}{}", self.config.base_url, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    fn build_headers<P>(&self, params: &P, has_body: bool) -> Result<HeaderMap>
    where
        P: RequestParams + ?Sized,
    {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.config.api_token.as_deref().filter(|t| !t.is_empty()) {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
        }
        headers.insert(REVISION, HeaderValue::from_static(WANIKANI_REVISION));

        let options = params.options();
        if let Some(since) = options.if_modified_since {
            headers.insert(IF_MODIFIED_SINCE, header_value(&since.to_http_date())?);
        }
        if let Some(ref etag) = options.if_none_match {
            headers.insert(IF_NONE_MATCH, header_value(etag)?);
        }

        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        Ok(headers)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("max_retries", &self.config.max_retries)
            .field("record_mode", &self.config.record_mode)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Interpret a raw response: 304, 200, or an API error
pub(super) fn decode_response<T>(response: TransportResponse) -> Result<T>
where
    T: DeserializeOwned + Default + ApiObject,
{
    match response.status {
        304 => {
            let mut target = T::default();
            apply_conditional_metadata(&mut target, &response.headers);
            target.object_mut().not_modified = true;
            Ok(target)
        }
        200 => {
            let mut target: T = serde_json::from_slice(&response.body)
                .map_err(|e| Error::decode(DecodeContext::Response, e))?;
            check_object_type(&target)?;
            apply_conditional_metadata(&mut target, &response.headers);
            Ok(target)
        }
        status => {
            let body: ApiErrorBody = serde_json::from_slice(&response.body)
                .map_err(|e| Error::decode(DecodeContext::ErrorBody, e))?;
            Err(Error::Api(body.into_api_error(status)))
        }
    }
}

fn check_object_type<T: ApiObject>(target: &T) -> Result<()> {
    let expected = T::expected_object_types();
    match target.object().object_type {
        Some(actual) if !expected.is_empty() && !expected.contains(&actual) => {
            Err(Error::UnexpectedObjectType {
                expected: expected
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                actual: actual.as_str().to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn apply_conditional_metadata<T: ApiObject>(target: &mut T, headers: &HeaderMap) {
    let object = target.object_mut();

    if let Some(etag) = headers.get(ETAG).and_then(|v| v.to_str().ok()) {
        object.etag = Some(etag.to_string());
    }

    if let Some(raw) = headers.get(LAST_MODIFIED).and_then(|v| v.to_str().ok()) {
        match DateTime::parse_from_rfc2822(raw) {
            Ok(t) => object.last_modified = Some(t.with_timezone(&Utc)),
            Err(e) => warn!("Ignoring unparseable Last-Modified header '{}': {}", raw, e),
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::config(format!("invalid header value: {e}")))
}

/// Backoff before retry `attempt` (1-indexed)
///
/// `2^attempt` seconds minus a random jitter of up to a quarter of that.
pub fn backoff_delay(attempt: u32) -> Duration {
    let base = Duration::from_secs(2u64.saturating_pow(attempt));
    let quarter = base.as_millis() as u64 / 4;
    if quarter == 0 {
        return base;
    }
    let jitter = rand::thread_rng().gen_range(0..quarter);
    base - Duration::from_millis(jitter)
}
