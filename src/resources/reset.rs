//! Resets

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's request to reset their progress to an earlier level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reset {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<ResetData>,
}

impl_api_object!(Reset, [ObjectType::Reset]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetData {
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub original_level: i32,
    pub target_level: i32,
}

pub type ResetPage = Page<Reset>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub ids: Vec<Id>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for ResetListParams {
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
    pub async fn reset_get(&self, params: &GetParams) -> Result<Reset> {
        self.get(&format!("/v2/resets/{}", params.id), params).await
    }

    pub async fn reset_list(&self, params: &ResetListParams) -> Result<ResetPage> {
        self.get("/v2/resets", params).await
    }
}
