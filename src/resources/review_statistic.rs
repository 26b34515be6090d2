//! Review statistics

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate answer statistics for one subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatistic {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<ReviewStatisticData>,
}

impl_api_object!(ReviewStatistic, [ObjectType::ReviewStatistic]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewStatisticData {
    pub created_at: DateTime<Utc>,
    pub hidden: bool,
    pub meaning_correct: i32,
    pub meaning_current_streak: i32,
    pub meaning_incorrect: i32,
    pub meaning_max_streak: i32,
    pub percentage_correct: i32,
    pub reading_correct: i32,
    pub reading_current_streak: i32,
    pub reading_incorrect: i32,
    pub reading_max_streak: i32,
    pub subject_id: Id,
    pub subject_type: ObjectType,
}

pub type ReviewStatisticPage = Page<ReviewStatistic>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewStatisticListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub hidden: Option<bool>,
    pub ids: Vec<Id>,
    pub percentages_greater_than: Option<i32>,
    pub percentages_lesser_than: Option<i32>,
    pub subject_ids: Vec<Id>,
    pub subject_types: Vec<ObjectType>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for ReviewStatisticListParams {
    fn encode_to_query(&self) -> String {
        let mut query = QueryEncoder::new();
        self.list_params.encode_into(&mut query);
        query
            .opt("hidden", &self.hidden)
            .list("ids", &self.ids)
            .opt("percentages_greater_than", &self.percentages_greater_than)
            .opt("percentages_lesser_than", &self.percentages_lesser_than)
            .list("subject_ids", &self.subject_ids)
            .list("subject_types", &self.subject_types)
            .opt("updated_after", &self.updated_after);
        query.finish()
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

impl Client {
    /// Retrieve a specific review statistic
    pub async fn review_statistic_get(&self, params: &GetParams) -> Result<ReviewStatistic> {
        self.get(&format!("/v2/review_statistics/{}", params.id), params)
            .await
    }

    /// List review statistics, ordered by ascending creation time
    pub async fn review_statistic_list(
        &self,
        params: &ReviewStatisticListParams,
    ) -> Result<ReviewStatisticPage> {
        self.get("/v2/review_statistics", params).await
    }
}
