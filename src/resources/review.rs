//! Reviews

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed review of a subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<ReviewData>,
}

impl_api_object!(Review, [ObjectType::Review]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewData {
    pub assignment_id: Id,
    pub created_at: DateTime<Utc>,
    pub ending_srs_stage: i32,
    pub incorrect_meaning_answers: i32,
    pub incorrect_reading_answers: i32,
    pub spaced_repetition_system_id: Id,
    pub starting_srs_stage: i32,
    pub subject_id: Id,
}

pub type ReviewPage = Page<Review>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub assignment_ids: Vec<Id>,
    pub ids: Vec<Id>,
    pub subject_ids: Vec<Id>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for ReviewListParams {
    fn encode_to_query(&self) -> String {
        let mut query = QueryEncoder::new();
        self.list_params.encode_into(&mut query);
        query
            .list("assignment_ids", &self.assignment_ids)
            .list("ids", &self.ids)
            .list("subject_ids", &self.subject_ids)
            .opt("updated_after", &self.updated_after);
        query.finish()
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

/// A review to record
///
/// Identify the subject either by `assignment_id` or `subject_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewCreateParams {
    #[serde(skip)]
    pub options: RequestOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<WkTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorrect_meaning_answers: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorrect_reading_answers: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<Id>,
}

impl RequestParams for ReviewCreateParams {
    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

#[derive(Serialize)]
struct ReviewCreateBody<'a> {
    review: &'a ReviewCreateParams,
}

impl Client {
    /// Record a review for an assignment
    pub async fn review_create(&self, params: &ReviewCreateParams) -> Result<Review> {
        let body = ReviewCreateBody { review: params };
        self.post("/v2/reviews", params, &body).await
    }

    /// Retrieve a specific review
    pub async fn review_get(&self, params: &GetParams) -> Result<Review> {
        self.get(&format!("/v2/reviews/{}", params.id), params).await
    }

    /// List reviews, ordered by ascending creation time, 1000 at a time
    pub async fn review_list(&self, params: &ReviewListParams) -> Result<ReviewPage> {
        self.get("/v2/reviews", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::RecordedResponse;
    use crate::testing::{local_client, query_unescape};
    use crate::types::Method;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_review_create() {
        let client = local_client();

        client
            .review_create(&ReviewCreateParams {
                incorrect_meaning_answers: Some(2),
                subject_id: Some(Id(123)),
                ..Default::default()
            })
            .await
            .unwrap();

        let requests = client.recorded_requests();
        let req = &requests[0];
        assert_eq!(
            req.body_text(),
            r#"{"review":{"incorrect_meaning_answers":2,"subject_id":123}}"#
        );
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/v2/reviews");
        assert_eq!(req.query, "");
    }

    #[tokio::test]
    async fn test_review_get() {
        let client = local_client();

        client.review_get(&GetParams::new(Id(123))).await.unwrap();

        let requests = client.recorded_requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/v2/reviews/123");
    }

    #[tokio::test]
    async fn test_review_list() {
        let client = local_client();

        client
            .review_list(&ReviewListParams {
                assignment_ids: vec![Id(4), Id(5)],
                subject_ids: vec![Id(6)],
                ..Default::default()
            })
            .await
            .unwrap();

        let requests = client.recorded_requests();
        assert_eq!(requests[0].path, "/v2/reviews");
        assert_eq!(
            query_unescape(&requests[0].query),
            "assignment_ids=4,5&subject_ids=6"
        );
    }

    #[tokio::test]
    async fn test_review_get_rejects_other_object_type() {
        let client = local_client();
        client.push_recorded_response(RecordedResponse::ok(r#"{"id": 1, "object": "assignment"}"#));

        let err = client.review_get(&GetParams::new(Id(1))).await.unwrap_err();
        assert!(matches!(err, crate::Error::UnexpectedObjectType { .. }));
    }
}
