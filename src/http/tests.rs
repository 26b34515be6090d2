//! Tests for the HTTP client module

use super::client::decode_response;
use super::*;
use crate::error::{DecodeContext, Error, TransportErrorKind};
use crate::object::{Object, Page};
use crate::query::RequestOptions;
use crate::types::{Method, WkTime};
use bytes::Bytes;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue, ETAG, LAST_MODIFIED};
use std::sync::Arc;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record_client(max_retries: u32) -> Client {
    let config = ClientConfig::builder()
        .api_token("test-token")
        .record_mode(true)
        .no_retry_sleep(true)
        .max_retries(max_retries)
        .build();
    Client::new(config).unwrap()
}

fn recorder(client: &Client) -> &RecordingTransport {
    client.recorder().unwrap()
}

async fn get_object(client: &Client) -> crate::Result<Object> {
    client.get("/v2/user", &RequestOptions::new()).await
}

// ============================================================================
// Retry Tests
// ============================================================================

#[test_case(1 ; "one failure")]
#[test_case(3 ; "three failures")]
#[test_case(5 ; "five failures")]
#[tokio::test]
async fn test_retries_exactly_up_to_max(failures: u32) {
    let client = record_client(failures);
    for _ in 0..failures {
        recorder(&client).push_response(RecordedResponse::status(500, ""));
    }
    recorder(&client).push_response(RecordedResponse::ok(r#"{"id": 1}"#));

    let obj = get_object(&client).await.unwrap();
    assert_eq!(obj.id.get(), 1);
    assert_eq!(recorder(&client).request_count(), failures as usize + 1);
}

#[test_case(1 ; "one failure")]
#[test_case(3 ; "three failures")]
#[tokio::test]
async fn test_retries_exhausted_returns_last_error(failures: u32) {
    let client = record_client(failures - 1);
    for _ in 0..failures {
        recorder(&client).push_response(RecordedResponse::status(500, ""));
    }
    recorder(&client).push_response(RecordedResponse::ok("{}"));

    let err = get_object(&client).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(recorder(&client).request_count(), failures as usize);
    assert_eq!(recorder(&client).pending_responses(), 1);
}

#[test_case(429 ; "too many requests")]
#[test_case(500 ; "internal server error")]
#[test_case(503 ; "service unavailable")]
#[tokio::test]
async fn test_retryable_statuses(status: u16) {
    let client = record_client(1);
    recorder(&client).push_response(RecordedResponse::status(
        status,
        format!(r#"{{"code": {status}, "error": "slow down"}}"#),
    ));

    get_object(&client).await.unwrap();
    assert_eq!(recorder(&client).request_count(), 2);
}

#[test_case(400 ; "bad request")]
#[test_case(401 ; "unauthorized")]
#[test_case(404 ; "not found")]
#[test_case(422 ; "unprocessable")]
#[tokio::test]
async fn test_other_statuses_are_not_retried(status: u16) {
    let client = record_client(3);
    recorder(&client).push_response(RecordedResponse::status(
        status,
        format!(r#"{{"code": {status}, "error": "nope"}}"#),
    ));

    let err = get_object(&client).await.unwrap_err();
    assert_eq!(err.status(), Some(status));
    assert_eq!(err.to_string(), format!("API error {status}: nope"));
    assert_eq!(recorder(&client).request_count(), 1);
}

#[test_case(TransportErrorKind::CertificateAuthority ; "certificate authority")]
#[test_case(TransportErrorKind::UnsupportedScheme ; "unsupported scheme")]
#[test_case(TransportErrorKind::TooManyRedirects ; "too many redirects")]
#[test_case(TransportErrorKind::InvalidRequest ; "invalid request")]
#[tokio::test]
async fn test_fatal_transport_failures_are_not_retried(kind: TransportErrorKind) {
    let client = record_client(3);
    recorder(&client).push_response(RecordedResponse::failure(kind, "boom"));

    let err = get_object(&client).await.unwrap_err();
    assert!(matches!(err, Error::Transport { kind: k, .. } if k == kind));
    assert_eq!(recorder(&client).request_count(), 1);
}

#[test_case(TransportErrorKind::Connect ; "connect")]
#[test_case(TransportErrorKind::Timeout ; "timeout")]
#[test_case(TransportErrorKind::Other ; "other")]
#[tokio::test]
async fn test_transient_transport_failures_are_retried(kind: TransportErrorKind) {
    let client = record_client(2);
    recorder(&client).extend_responses([
        RecordedResponse::failure(kind, "reset"),
        RecordedResponse::failure(kind, "reset"),
        RecordedResponse::ok(r#"{"id": 9}"#),
    ]);

    let obj = get_object(&client).await.unwrap();
    assert_eq!(obj.id.get(), 9);
    assert_eq!(recorder(&client).request_count(), 3);
}

#[tokio::test]
async fn test_decode_failure_is_not_retried() {
    let client = record_client(3);
    recorder(&client).push_response(RecordedResponse::ok("definitely not json"));

    let err = get_object(&client).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            context: DecodeContext::Response,
            ..
        }
    ));
    assert_eq!(recorder(&client).request_count(), 1);
}

#[tokio::test]
async fn test_deadline_cuts_backoff_short() {
    let config = ClientConfig::builder()
        .api_token("test-token")
        .record_mode(true)
        .max_retries(5)
        .build();
    let client = Client::new(config).unwrap();
    recorder(&client).push_response(RecordedResponse::status(503, ""));

    // First backoff is at least 1.5s, past the deadline.
    let opts = RequestOptions::new().timeout(Duration::from_secs(1));
    let err = client
        .get::<Object, _>("/v2/user", &opts)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(recorder(&client).request_count(), 1);
}

#[tokio::test]
async fn test_deadline_bounds_rate_limit_wait() {
    let config = ClientConfig::builder()
        .api_token("test-token")
        .record_mode(true)
        .no_retry_sleep(true)
        .rate_limit(RateLimiterConfig::new(1, 1))
        .build();
    let client = Client::new(config).unwrap();

    // Spends the only permit for the next minute.
    get_object(&client).await.unwrap();

    let opts = RequestOptions::new().timeout(Duration::from_millis(200));
    let result = tokio::time::timeout(
        Duration::from_secs(3),
        client.get::<Object, _>("/v2/user", &opts),
    )
    .await
    .expect("call should give up at its deadline");

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport {
            kind: TransportErrorKind::Timeout,
            ..
        }
    ));
    assert_eq!(recorder(&client).request_count(), 1);
}

#[test]
fn test_backoff_grows_exponentially() {
    assert!(backoff_delay(1) <= Duration::from_secs(2));
    assert!(backoff_delay(2) > Duration::from_secs(2));
    assert!(backoff_delay(3) > Duration::from_secs(4));
    assert!(backoff_delay(3) <= Duration::from_secs(8));
}

// ============================================================================
// Credential Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_fails_before_any_attempt() {
    let transport = Arc::new(RecordingTransport::new());
    let client = Client::with_transport(ClientConfig::default(), transport.clone());

    let err = get_object(&client).await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_record_mode_needs_no_token() {
    let client = Client::new(ClientConfig::builder().record_mode(true).build()).unwrap();

    get_object(&client).await.unwrap();
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("authorization"), None);
}

// ============================================================================
// Request Shape Tests
// ============================================================================

#[tokio::test]
async fn test_request_headers() {
    let client = record_client(0);
    get_object(&client).await.unwrap();

    let requests = client.recorded_requests();
    let req = &requests[0];
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.path, "/v2/user");
    assert_eq!(req.query, "");
    assert_eq!(req.header("authorization"), Some("Bearer test-token"));
    assert_eq!(req.header(REVISION_HEADER), Some(WANIKANI_REVISION));
    assert_eq!(req.header("content-type"), None);
    assert_eq!(req.header("if-none-match"), None);
    assert_eq!(req.header("if-modified-since"), None);
    assert!(req.body.is_none());
}

#[tokio::test]
async fn test_conditional_headers() {
    let client = record_client(0);
    let since = WkTime::from(
        NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
            .and_utc(),
    );
    let opts = RequestOptions::new()
        .if_none_match("W/\"etag\"")
        .if_modified_since(since);

    client.get::<Object, _>("/v2/user", &opts).await.unwrap();

    let requests = client.recorded_requests();
    let req = &requests[0];
    assert_eq!(req.header("if-none-match"), Some("W/\"etag\""));
    assert_eq!(
        req.header("if-modified-since"),
        Some("Thu, 02 Jan 2020 03:04:05 GMT")
    );
}

#[tokio::test]
async fn test_body_is_serialized_with_content_type() {
    let client = record_client(0);
    let body = serde_json::json!({"user": {"preferences": {"lessons_batch_size": 5}}});

    client
        .put::<Object, _, _>("/v2/user", &RequestOptions::new(), &body)
        .await
        .unwrap();

    let requests = client.recorded_requests();
    let req = &requests[0];
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.header("content-type"), Some("application/json; charset=utf-8"));
    assert_eq!(
        req.body_text(),
        r#"{"user":{"preferences":{"lessons_batch_size":5}}}"#
    );
}

#[tokio::test]
async fn test_same_request_twice_is_identical() {
    let client = record_client(0);
    get_object(&client).await.unwrap();
    get_object(&client).await.unwrap();

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, requests[1].path);
    assert_eq!(requests[0].query, requests[1].query);
    assert_eq!(requests[0].headers, requests[1].headers);
}

// ============================================================================
// Response Tests
// ============================================================================

#[tokio::test]
async fn test_not_modified() {
    let client = record_client(3);
    recorder(&client).push_response(RecordedResponse::not_modified().header("ETag", "W/\"same\""));

    let page: Page<Object> = client.get("/v2/subjects", &RequestOptions::new()).await.unwrap();
    assert!(page.page.object.not_modified);
    assert!(page.data.is_empty());
    assert_eq!(page.page.object.etag.as_deref(), Some("W/\"same\""));
    assert_eq!(recorder(&client).request_count(), 1);
}

#[tokio::test]
async fn test_response_metadata() {
    let client = record_client(0);
    recorder(&client).push_response(
        RecordedResponse::ok(r#"{"object": "collection", "data": [{"id": 1}, {"id": 2}]}"#)
            .header("ETag", "W/\"v1\"")
            .header("Last-Modified", "Thu, 02 Jan 2020 03:04:05 GMT"),
    );

    let page: Page<Object> = client.get("/v2/subjects", &RequestOptions::new()).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.page.object.etag.as_deref(), Some("W/\"v1\""));
    assert_eq!(
        page.page.object.last_modified.map(|t| t.to_rfc3339()),
        Some("2020-01-02T03:04:05+00:00".to_string())
    );
    assert!(!page.page.object.not_modified);
}

#[tokio::test]
async fn test_unreadable_error_body() {
    let client = record_client(3);
    recorder(&client).push_response(RecordedResponse::status(502, "<html>bad gateway</html>"));

    let err = get_object(&client).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            context: DecodeContext::ErrorBody,
            ..
        }
    ));
    assert_eq!(recorder(&client).request_count(), 1);
}

// ============================================================================
// Live Transport Tests
// ============================================================================

#[tokio::test]
async fn test_live_timeout_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .api_token("test-token")
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build();
    let client = Client::new(config).unwrap();

    let err = get_object(&client).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport {
            kind: TransportErrorKind::Timeout,
            ..
        }
    ));
}

#[tokio::test]
async fn test_live_bad_scheme_is_fatal() {
    let config = ClientConfig::builder()
        .api_token("test-token")
        .base_url("ftp://example.invalid")
        .max_retries(3)
        .no_retry_sleep(true)
        .build();
    let client = Client::new(config).unwrap();

    let err = get_object(&client).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport {
            kind: TransportErrorKind::UnsupportedScheme,
            ..
        }
    ));
    assert!(!err.is_retryable());
}

// ============================================================================
// Response Decoding Tests
// ============================================================================

fn response(status: u16, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        headers: HeaderMap::new(),
        body: Bytes::from(body.to_string()),
    }
}

#[test]
fn test_decode_200_with_headers() {
    let mut resp = response(200, r#"{"id": 5, "object": "collection"}"#);
    resp.headers.insert(ETAG, HeaderValue::from_static("W/\"abc\""));
    resp.headers.insert(
        LAST_MODIFIED,
        HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
    );

    let page: Page<Object> = decode_response(resp).unwrap();
    assert_eq!(page.page.object.etag.as_deref(), Some("W/\"abc\""));
    assert_eq!(
        page.page.object.last_modified.unwrap().to_rfc3339(),
        "2015-10-21T07:28:00+00:00"
    );
    assert!(!page.page.object.not_modified);
}

#[test]
fn test_decode_bad_last_modified_is_ignored() {
    let mut resp = response(200, "{}");
    resp.headers
        .insert(LAST_MODIFIED, HeaderValue::from_static("yesterday"));
    let obj: Object = decode_response(resp).unwrap();
    assert!(obj.last_modified.is_none());
}

#[test]
fn test_decode_304_leaves_data_empty() {
    let page: Page<Object> = decode_response(response(304, "")).unwrap();
    assert!(page.page.object.not_modified);
    assert!(page.data.is_empty());
}

#[test]
fn test_decode_wrong_object_type() {
    let err = decode_response::<Page<Object>>(response(200, r#"{"object": "user"}"#))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedObjectType { ref actual, .. } if actual == "user"
    ));
}

#[test]
fn test_decode_error_body() {
    let err = decode_response::<Object>(response(
        401,
        r#"{"code": 401, "error": "Unauthorized. Nice try."}"#,
    ))
    .unwrap_err();
    assert!(matches!(err, Error::Api(ref e) if e.status == 401 && e.message == "Unauthorized. Nice try."));
}

#[test]
fn test_decode_undecodable_error_body() {
    let err = decode_response::<Object>(response(503, "<html>down</html>")).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            context: DecodeContext::ErrorBody,
            ..
        }
    ));
    assert!(!err.is_retryable());
}

#[test]
fn test_decode_bad_success_body() {
    let err = decode_response::<Object>(response(200, "not json")).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode {
            context: DecodeContext::Response,
            ..
        }
    ));
}

#[test]
fn test_backoff_delay_bounds() {
    for attempt in 1..=5 {
        let full = Duration::from_secs(2u64.pow(attempt));
        for _ in 0..20 {
            let delay = backoff_delay(attempt);
            assert!(delay <= full, "{delay:?} > {full:?}");
            assert!(delay > full * 3 / 4 - Duration::from_millis(1), "{delay:?} too short");
        }
    }
}
