//! Query encoding module
//!
//! Turns structured filter sets into URL query strings.
//!
//! # Rules
//!
//! - Absent filters are omitted, never sent as empty values
//! - Lists are comma-joined in the order given
//! - Booleans encode as `true`/`false`, timestamps as RFC3339
//! - Keys are sorted, so encoding is byte-for-byte reproducible

mod encoder;
mod params;

pub use encoder::{QueryEncoder, QueryValue};
pub use params::{ListParams, RequestOptions, RequestParams};
