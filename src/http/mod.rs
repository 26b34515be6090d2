//! HTTP client module
//!
//! Provides the request engine used by every resource accessor.
//!
//! # Features
//!
//! - **Automatic Retries**: Exponential backoff with jitter on 429/500/503 and
//!   transient transport failures
//! - **Conditional Requests**: `If-None-Match` / `If-Modified-Since`, with 304
//!   surfaced as a flag instead of an error
//! - **Record Mode**: Offline transport that captures requests and replays
//!   seeded responses
//! - **Rate Limiting**: Optional token bucket rate limiter using governor

mod client;
mod config;
mod rate_limit;
mod transport;

pub use client::{backoff_delay, Client};
pub use config::{
    ClientConfig, ClientConfigBuilder, API_TOKEN_ENV, REVISION_HEADER, WANIKANI_API_URL,
    WANIKANI_REVISION,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig, API_REQUESTS_PER_MINUTE};
pub use transport::{
    RecordedRequest, RecordedResponse, RecordingTransport, ReqwestTransport, Transport,
    TransportRequest, TransportResponse,
};

#[cfg(test)]
mod tests;
