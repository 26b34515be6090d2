//! Tests for pagination module

use super::*;
use crate::error::{Error, PaginationError};
use crate::object::{Object, Page, PageObject, Pages};
use crate::types::Id;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::collections::VecDeque;

fn page_object(next_url: Option<&str>) -> PageObject {
    PageObject {
        object: Object::default(),
        total_count: 7,
        pages: Pages {
            next_url: next_url.map(str::to_string),
            previous_url: None,
            per_page: 3,
        },
    }
}

fn page_of(ids: &[i64], next_url: Option<&str>) -> Page<Object> {
    Page {
        page: page_object(next_url),
        data: ids
            .iter()
            .map(|&id| Object {
                id: Id(id),
                ..Object::default()
            })
            .collect(),
    }
}

const PAGE_ONE_NEXT: &str = "https://api.wanikani.com/v2/subjects?page_after_id=125";
const PAGE_TWO_NEXT: &str = "https://api.wanikani.com/v2/subjects?levels=1%2C2&page_after_id=128";

// ============================================================================
// for_each_page Tests
// ============================================================================

#[tokio::test]
async fn test_three_page_traversal() {
    let pages = RefCell::new(VecDeque::from([
        page_object(Some(PAGE_ONE_NEXT)),
        page_object(Some(PAGE_TWO_NEXT)),
        page_object(None),
    ]));
    let cursors = RefCell::new(Vec::new());

    for_each_page(|cursor| {
        cursors.borrow_mut().push(cursor);
        let page = pages.borrow_mut().pop_front();
        async move { Ok(page) }
    })
    .await
    .unwrap();

    assert_eq!(
        cursors.into_inner(),
        vec![None, Some(Id(125)), Some(Id(128))]
    );
    assert!(pages.borrow().is_empty());
}

#[tokio::test]
async fn test_empty_next_url_ends_pagination() {
    let mut calls = 0;

    for_each_page(|_| {
        calls += 1;
        async { Ok(Some(page_object(Some("")))) }
    })
    .await
    .unwrap();

    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_caller_can_stop_early() {
    let mut calls = 0;

    for_each_page(|cursor| {
        calls += 1;
        async move {
            Ok(match cursor {
                None => Some(page_object(Some(PAGE_ONE_NEXT))),
                Some(_) => None,
            })
        }
    })
    .await
    .unwrap();

    assert_eq!(calls, 2);
}

#[tokio::test]
async fn test_missing_cursor_stops_without_another_fetch() {
    let mut calls = 0;

    let err = for_each_page(|_| {
        calls += 1;
        async {
            Ok(Some(page_object(Some(
                "https://api.wanikani.com/v2/subjects?levels=1",
            ))))
        }
    })
    .await
    .unwrap_err();

    assert_eq!(calls, 1);
    assert!(matches!(
        err,
        Error::Pagination(PaginationError::MissingCursor { .. })
    ));
}

#[tokio::test]
async fn test_fetch_error_is_returned_unchanged() {
    let err = for_each_page(|_| async { Err(Error::api(401, "Unauthorized")) })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "API error 401: Unauthorized");
}

// ============================================================================
// collect_all Tests
// ============================================================================

#[tokio::test]
async fn test_collect_all_concatenates_in_order() {
    let mut pages = VecDeque::from([
        page_of(&[120, 125], Some(PAGE_ONE_NEXT)),
        page_of(&[126, 128], Some(PAGE_TWO_NEXT)),
        page_of(&[130], None),
    ]);

    let items = collect_all(|_| {
        let page = pages.pop_front().unwrap_or_default();
        async move { Ok(page) }
    })
    .await
    .unwrap();

    let ids: Vec<i64> = items.iter().map(|o| o.id.get()).collect();
    assert_eq!(ids, vec![120, 125, 126, 128, 130]);
    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_collect_all_propagates_cursor_errors() {
    let err = collect_all(|_| async {
        Ok(page_of(
            &[1],
            Some("https://api.wanikani.com/v2/subjects?page_after_id=abc"),
        ))
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Pagination(PaginationError::InvalidCursor { ref value, .. }) if value == "abc"
    ));
}

// ============================================================================
// cursor_from_next_url Tests
// ============================================================================

#[test]
fn test_cursor_extracted() {
    assert_eq!(cursor_from_next_url(PAGE_ONE_NEXT).unwrap(), Id(125));
    assert_eq!(cursor_from_next_url(PAGE_TWO_NEXT).unwrap(), Id(128));
}

#[test]
fn test_cursor_bad_url() {
    let err = cursor_from_next_url("not a url").unwrap_err();
    assert!(matches!(err, PaginationError::InvalidUrl { .. }));
}

#[test]
fn test_cursor_bad_escape() {
    let err =
        cursor_from_next_url("https://api.wanikani.com/v2/subjects?page_after_id=1%zz").unwrap_err();
    assert!(matches!(err, PaginationError::InvalidQuery { .. }));
}

#[test]
fn test_cursor_semicolon_separator() {
    let err = cursor_from_next_url("https://api.wanikani.com/v2/subjects?a=1;page_after_id=2")
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidQuery { .. }));
}

#[test]
fn test_cursor_missing() {
    let err = cursor_from_next_url("https://api.wanikani.com/v2/subjects").unwrap_err();
    assert!(matches!(err, PaginationError::MissingCursor { .. }));
}

#[test]
fn test_cursor_empty_value_counts_as_missing() {
    let err = cursor_from_next_url("https://api.wanikani.com/v2/subjects?page_after_id=")
        .unwrap_err();
    assert!(matches!(err, PaginationError::MissingCursor { .. }));
}

#[test]
fn test_cursor_not_an_integer() {
    let err = cursor_from_next_url("https://api.wanikani.com/v2/subjects?page_after_id=12x")
        .unwrap_err();
    assert!(matches!(err, PaginationError::InvalidCursor { ref value, .. } if value == "12x"));
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_advance() {
    let mut state = PaginationState::new();
    assert_eq!(state.cursor, None);

    state.advance(NextPage::Continue(Id(5)));
    assert_eq!(state.pages, 1);
    assert_eq!(state.cursor, Some(Id(5)));
    assert!(!state.done);

    state.advance(NextPage::Done);
    assert_eq!(state.pages, 2);
    assert_eq!(state.cursor, None);
    assert!(state.done);
}
