// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # WaniKani API Client
//!
//! A typed client for the WaniKani v2 JSON API.
//!
//! ## Features
//!
//! - **Typed Resources**: Subjects, assignments, reviews, study materials and
//!   the rest, each with typed filters
//! - **Retries**: Exponential backoff with jitter on rate limits and transient
//!   server or network failures
//! - **Conditional Requests**: `If-None-Match` / `If-Modified-Since` with 304
//!   surfaced as a flag
//! - **Pagination**: Cursor-following over any list endpoint
//! - **Record Mode**: Offline request capture for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wanikani_api::{Client, ClientConfig, ListParams, Result, SubjectListParams};
//! use wanikani_api::pagination::collect_all;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut config = ClientConfig::from_env()?;
//!     config.max_retries = 2;
//!     let client = Client::new(config)?;
//!
//!     // Every level 1 subject, across as many pages as it takes
//!     let subjects = collect_all(|cursor| {
//!         let params = SubjectListParams {
//!             list_params: ListParams::after(cursor),
//!             levels: vec![1],
//!             ..Default::default()
//!         };
//!         let client = client.clone();
//!         async move { client.subject_list(&params).await }
//!     })
//!     .await?;
//!
//!     println!("{} subjects", subjects.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Resource accessors                         │
//! │  subject_list()  assignment_start()  review_create()  ...       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────────────┴────────────┬────────────────────┐
//! │   Query   │          Request engine       │     Pagination     │
//! ├───────────┼───────────────────────────────┼────────────────────┤
//! │ Sorted    │ Auth + revision headers       │ next_url cursor    │
//! │ Lists     │ Retry / backoff / deadline    │ for_each_page      │
//! │ Timestamps│ 304 / ETag / Last-Modified    │ collect_all        │
//! └───────────┴───────────────┬───────────────┴────────────────────┘
//!                             │
//!                 ┌───────────┴───────────┐
//!                 │       Transport       │
//!                 │  reqwest │ recording  │
//!                 └───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Identifier, timestamp and discriminator types
pub mod types;

/// Response envelopes shared by every resource
pub mod object;

/// Query string encoding and request parameters
pub mod query;

/// Request engine with retry, conditional requests and record mode
pub mod http;

/// Cursor-following over list endpoints
pub mod pagination;

/// Typed resource accessors
pub mod resources;

/// Helpers for offline and live tests
pub mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, Error, PaginationError, Result, TransportErrorKind};
pub use http::{Client, ClientConfig, RecordedRequest, RecordedResponse};
pub use object::{ApiObject, Object, Page, PageObject, Pages};
pub use query::{ListParams, RequestOptions, RequestParams};
pub use resources::*;
pub use types::{Id, Method, ObjectType, WkTime};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
