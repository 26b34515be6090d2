//! Pagination module
//!
//! Drives a list accessor across cursor-linked pages.
//!
//! # Overview
//!
//! Every list response carries `pages.next_url`. When it is non-empty its
//! query string holds a `page_after_id` cursor; the paginator parses it and
//! calls the fetch function again. This is the only place that interprets
//! pagination URLs.

mod paginator;
mod types;

pub use paginator::{collect_all, cursor_from_next_url, for_each_page};
pub use types::{NextPage, PaginationState};

#[cfg(test)]
mod tests;
