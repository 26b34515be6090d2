//! Deterministic query string encoding
//!
//! Keys are emitted in sorted order so identical filters always produce the
//! same bytes regardless of the order fields were added.

use crate::types::{Id, ObjectType, WkTime};
use std::collections::BTreeMap;
use url::form_urlencoded::byte_serialize;

/// A value that can appear in a query string
pub trait QueryValue {
    /// Unescaped textual form
    fn to_query_value(&self) -> String;
}

impl QueryValue for bool {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for i32 {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for i64 {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for u32 {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for Id {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for WkTime {
    fn to_query_value(&self) -> String {
        self.encode()
    }
}

impl QueryValue for ObjectType {
    fn to_query_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> String {
        self.clone()
    }
}

impl QueryValue for &str {
    fn to_query_value(&self) -> String {
        (*self).to_string()
    }
}

/// Builds a query string from optional and list-valued filters
///
/// Absent options and empty lists are omitted entirely. List elements are
/// escaped individually and joined with a literal `,`.
#[derive(Debug, Clone, Default)]
pub struct QueryEncoder {
    pairs: BTreeMap<&'static str, String>,
}

impl QueryEncoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single value
    pub fn value<V: QueryValue>(&mut self, key: &'static str, value: &V) -> &mut Self {
        self.pairs.insert(key, escape(&value.to_query_value()));
        self
    }

    /// Add a value if present
    pub fn opt<V: QueryValue>(&mut self, key: &'static str, value: &Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.value(key, v);
        }
        self
    }

    /// Add a comma-joined list if non-empty
    pub fn list<V: QueryValue>(&mut self, key: &'static str, values: &[V]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| escape(&v.to_query_value()))
                .collect::<Vec<_>>()
                .join(",");
            self.pairs.insert(key, joined);
        }
        self
    }

    /// Number of keys that will be emitted
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether nothing will be emitted
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render the query string (without a leading `?`)
    pub fn finish(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={v}", escape(k)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn escape(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}
