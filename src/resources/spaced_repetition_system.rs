//! Spaced repetition systems
//!
//! Each system defines the stages a subject moves through and how long a
//! subject waits at each one.

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacedRepetitionSystem {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<SpacedRepetitionSystemData>,
}

impl_api_object!(SpacedRepetitionSystem, [ObjectType::SpacedRepetitionSystem]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacedRepetitionSystemData {
    pub burning_stage_position: i32,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub name: String,
    pub passing_stage_position: i32,
    pub stages: Vec<SpacedRepetitionSystemStage>,
    pub starting_stage_position: i32,
    pub unlocking_stage_position: i32,
}

/// One stage of a system
///
/// The first and last stages have no interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacedRepetitionSystemStage {
    pub interval: Option<i64>,
    pub interval_unit: Option<String>,
    pub position: i32,
}

pub type SpacedRepetitionSystemPage = Page<SpacedRepetitionSystem>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacedRepetitionSystemListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub ids: Vec<Id>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for SpacedRepetitionSystemListParams {
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
    /// Retrieve a specific spaced repetition system
    pub async fn spaced_repetition_system_get(
        &self,
        params: &GetParams,
    ) -> Result<SpacedRepetitionSystem> {
        self.get(
            &format!("/v2/spaced_repetition_systems/{}", params.id),
            params,
        )
        .await
    }

    /// List spaced repetition systems
    pub async fn spaced_repetition_system_list(
        &self,
        params: &SpacedRepetitionSystemListParams,
    ) -> Result<SpacedRepetitionSystemPage> {
        self.get("/v2/spaced_repetition_systems", params).await
    }
}
