//! Assignments
//!
//! A user's progress on one subject, created once every component of the
//! subject has been passed.

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's progress on a particular subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<AssignmentData>,
}

impl_api_object!(Assignment, [ObjectType::Assignment]);

/// Core data of an [`Assignment`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentData {
    pub available_at: Option<DateTime<Utc>>,
    pub burned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub hidden: bool,
    pub passed_at: Option<DateTime<Utc>>,
    pub resurrected_at: Option<DateTime<Utc>>,
    pub srs_stage: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub subject_id: Id,
    pub subject_type: ObjectType,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// A single page of assignments
pub type AssignmentPage = Page<Assignment>;

/// Filters for listing assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub available_after: Option<WkTime>,
    pub available_before: Option<WkTime>,
    pub burned: Option<bool>,
    pub hidden: Option<bool>,
    pub ids: Vec<Id>,
    pub immediately_available_for_lessons: Option<bool>,
    pub immediately_available_for_review: Option<bool>,
    pub in_review: Option<bool>,
    pub levels: Vec<i32>,
    pub srs_stages: Vec<i32>,
    pub started: Option<bool>,
    pub subject_ids: Vec<Id>,
    pub subject_types: Vec<ObjectType>,
    pub unlocked: Option<bool>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for AssignmentListParams {
    fn encode_to_query(&self) -> String {
        let mut query = QueryEncoder::new();
        self.list_params.encode_into(&mut query);
        query
            .opt("available_after", &self.available_after)
            .opt("available_before", &self.available_before)
            .opt("burned", &self.burned)
            .opt("hidden", &self.hidden)
            .list("ids", &self.ids)
            .opt(
                "immediately_available_for_lessons",
                &self.immediately_available_for_lessons,
            )
            .opt(
                "immediately_available_for_review",
                &self.immediately_available_for_review,
            )
            .opt("in_review", &self.in_review)
            .list("levels", &self.levels)
            .list("srs_stages", &self.srs_stages)
            .opt("started", &self.started)
            .list("subject_ids", &self.subject_ids)
            .list("subject_types", &self.subject_types)
            .opt("unlocked", &self.unlocked)
            .opt("updated_after", &self.updated_after);
        query.finish()
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

/// Parameters for starting an assignment
///
/// Only `started_at` is sent in the body; it defaults to the server's clock.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentStartParams {
    #[serde(skip)]
    pub id: Id,

    #[serde(skip)]
    pub options: RequestOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<WkTime>,
}

impl RequestParams for AssignmentStartParams {
    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

impl Client {
    /// Retrieve a specific assignment by its identifier
    pub async fn assignment_get(&self, params: &GetParams) -> Result<Assignment> {
        self.get(&format!("/v2/assignments/{}", params.id), params)
            .await
    }

    /// List assignments, ordered by ascending creation time, 500 at a time
    pub async fn assignment_list(&self, params: &AssignmentListParams) -> Result<AssignmentPage> {
        self.get("/v2/assignments", params).await
    }

    /// Mark an assignment as started, moving it from lessons to reviews
    pub async fn assignment_start(&self, params: &AssignmentStartParams) -> Result<Assignment> {
        self.post(&format!("/v2/assignments/{}/start", params.id), params, params)
            .await
    }
}
