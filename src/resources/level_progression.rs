//! Level progressions

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's progress through one level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelProgression {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<LevelProgressionData>,
}

impl_api_object!(LevelProgression, [ObjectType::LevelProgression]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelProgressionData {
    pub abandoned_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub level: i32,
    pub passed_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub unlocked_at: Option<DateTime<Utc>>,
}

pub type LevelProgressionPage = Page<LevelProgression>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelProgressionListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub ids: Vec<Id>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for LevelProgressionListParams {
    fn encode_to_query(&self) -> String {
        let mut query = QueryEncoder::new();
        self.list_params.encode_into(&mut query);
        query
            .list("ids", &self.ids)
            .opt("updated_after", &self.updated_after);
        query.finish()
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

impl Client {
    /// Retrieve a specific level progression
    pub async fn level_progression_get(&self, params: &GetParams) -> Result<LevelProgression> {
        self.get(&format!("/v2/level_progressions/{}", params.id), params)
            .await
    }

    /// List level progressions, ordered by ascending creation time
    pub async fn level_progression_list(
        &self,
        params: &LevelProgressionListParams,
    ) -> Result<LevelProgressionPage> {
        self.get("/v2/level_progressions", params).await
    }
}
