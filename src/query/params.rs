//! Parameter capability shared by every accessor
//!
//! A parameter type knows how to encode its filters and exposes the common
//! per-request options. Nothing else about it is visible to the engine.

use super::encoder::QueryEncoder;
use crate::types::{Id, WkTime};
use std::time::Duration;

/// Options common to every request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Sent as `If-Modified-Since` in HTTP date form
    pub if_modified_since: Option<WkTime>,

    /// Sent verbatim as `If-None-Match`
    pub if_none_match: Option<String>,

    /// Deadline for the whole call, retries and backoff included
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return data changed since this time
    #[must_use]
    pub fn if_modified_since(mut self, time: impl Into<WkTime>) -> Self {
        self.if_modified_since = Some(time.into());
        self
    }

    /// Only return data whose entity tag differs from this one
    #[must_use]
    pub fn if_none_match(mut self, etag: impl Into<String>) -> Self {
        self.if_none_match = Some(etag.into());
        self
    }

    /// Bound the whole call by a deadline
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Capability implemented by every parameter type
pub trait RequestParams {
    /// Encode filters to a query string; empty when there are none
    fn encode_to_query(&self) -> String {
        String::new()
    }

    /// The common request options
    fn options(&self) -> &RequestOptions;
}

impl RequestParams for RequestOptions {
    fn options(&self) -> &RequestOptions {
        self
    }
}

/// Cursor fields common to every list endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page_after_id: Option<Id>,
    pub page_before_id: Option<Id>,
}

impl ListParams {
    /// Start after the given cursor
    pub fn after(id: Option<Id>) -> Self {
        Self {
            page_after_id: id,
            page_before_id: None,
        }
    }

    /// Add the cursor fields to an encoder
    pub fn encode_into(&self, query: &mut QueryEncoder) {
        query
            .opt("page_after_id", &self.page_after_id)
            .opt("page_before_id", &self.page_before_id);
    }
}
