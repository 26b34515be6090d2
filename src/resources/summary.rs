//! Summary of available lessons and reviews

use crate::error::Result;
use crate::http::Client;
use crate::object::Object;
use crate::query::RequestOptions;
use crate::types::{Id, ObjectType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lessons and reviews available now and over the next 24 hours
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<SummaryData>,
}

impl_api_object!(Summary, [ObjectType::Report]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryData {
    pub lessons: Vec<SummaryLesson>,
    pub next_reviews_at: Option<DateTime<Utc>>,
    pub reviews: Vec<SummaryReview>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLesson {
    pub available_at: DateTime<Utc>,
    pub subject_ids: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryReview {
    pub available_at: DateTime<Utc>,
    pub subject_ids: Vec<Id>,
}

impl Client {
    /// Retrieve the summary report
    pub async fn summary_get(&self, options: &RequestOptions) -> Result<Summary> {
        self.get("/v2/summary", options).await
    }
}
