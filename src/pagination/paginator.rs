//! Cursor-driven page loop
//!
//! List responses link to the next page through `pages.next_url`, whose
//! query string carries `page_after_id`. The loop extracts that cursor and
//! hands it back to the caller's fetch function until the last page.

use super::types::{NextPage, PaginationState};
use crate::error::{PaginationError, Result};
use crate::object::{Page, PageObject};
use crate::types::Id;
use std::future::Future;
use tracing::debug;
use url::Url;

const PAGE_AFTER_ID: &str = "page_after_id";

/// Call `fetch_page` once per page until the collection is exhausted
///
/// The first call gets `None`; each later call gets the `page_after_id`
/// taken from the previous page's `next_url`. Returning `Ok(None)` stops
/// early without error. Errors from `fetch_page` are returned unchanged
/// and a malformed `next_url` ends the loop with a pagination error.
pub async fn for_each_page<F, Fut>(mut fetch_page: F) -> Result<()>
where
    F: FnMut(Option<Id>) -> Fut,
    Fut: Future<Output = Result<Option<PageObject>>>,
{
    let mut state = PaginationState::new();

    loop {
        let Some(page) = fetch_page(state.cursor).await? else {
            debug!("Pagination stopped by caller after {} pages", state.pages);
            state.mark_done();
            return Ok(());
        };

        let next = next_page(&page)?;
        state.advance(next);

        if state.done {
            debug!("Pagination complete after {} pages", state.pages);
            return Ok(());
        }
    }
}

/// Fetch every page and concatenate their `data`
pub async fn collect_all<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<Id>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut state = PaginationState::new();

    loop {
        let page = fetch_page(state.cursor).await?;
        let next = next_page(&page.page)?;

        items.extend(page.data);
        state.advance(next);

        if state.done {
            debug!(
                "Collected {} items across {} pages",
                items.len(),
                state.pages
            );
            return Ok(items);
        }
    }
}

fn next_page(page: &PageObject) -> std::result::Result<NextPage, PaginationError> {
    let next = match page.pages.next_url() {
        Some(url) => NextPage::Continue(cursor_from_next_url(url)?),
        None => NextPage::Done,
    };

    debug!(
        "Fetched page (per_page: {}, total_count: {}, next_url: {:?})",
        page.pages.per_page,
        page.total_count,
        page.pages.next_url()
    );

    Ok(next)
}

/// Extract the `page_after_id` cursor from a next-page URL
pub fn cursor_from_next_url(next_url: &str) -> std::result::Result<Id, PaginationError> {
    let url = Url::parse(next_url).map_err(|source| PaginationError::InvalidUrl {
        url: next_url.to_string(),
        source,
    })?;

    validate_query(url.query().unwrap_or_default()).map_err(|message| {
        PaginationError::InvalidQuery {
            url: next_url.to_string(),
            message,
        }
    })?;

    let value = url
        .query_pairs()
        .find(|(key, _)| key == PAGE_AFTER_ID)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PaginationError::MissingCursor {
            url: next_url.to_string(),
        })?;

    value
        .parse::<Id>()
        .map_err(|source| PaginationError::InvalidCursor {
            url: next_url.to_string(),
            value,
            source,
        })
}

// `query_pairs` is lenient; reject what a strict form decoder would.
fn validate_query(query: &str) -> std::result::Result<(), String> {
    if query.contains(';') {
        return Err("invalid semicolon separator in query".to_string());
    }

    let bytes = query.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|e| e.iter().all(u8::is_ascii_hexdigit)) {
                let end = (i + 3).min(bytes.len());
                return Err(format!(
                    "invalid URL escape \"{}\"",
                    String::from_utf8_lossy(&bytes[i..end])
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(())
}
