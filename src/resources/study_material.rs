//! Study materials
//!
//! User-specific notes and synonyms attached to a subject.

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyMaterial {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<StudyMaterialData>,
}

impl_api_object!(StudyMaterial, [ObjectType::StudyMaterial]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyMaterialData {
    pub created_at: DateTime<Utc>,
    pub hidden: bool,
    pub meaning_note: Option<String>,
    pub meaning_synonyms: Vec<String>,
    pub reading_note: Option<String>,
    pub subject_id: Id,
    pub subject_type: ObjectType,
}

pub type StudyMaterialPage = Page<StudyMaterial>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyMaterialListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub hidden: Option<bool>,
    pub ids: Vec<Id>,
    pub subject_ids: Vec<Id>,
    pub subject_types: Vec<ObjectType>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for StudyMaterialListParams {
    fn encode_to_query(&self) -> String {
        let mut query = QueryEncoder::new();
        self.list_params.encode_into(&mut query);
        query
            .opt("hidden", &self.hidden)
            .list("ids", &self.ids)
            .list("subject_ids", &self.subject_ids)
            .list("subject_types", &self.subject_types)
            .opt("updated_after", &self.updated_after);
        query.finish()
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

/// A new study material for a subject
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudyMaterialCreateParams {
    #[serde(skip)]
    pub options: RequestOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning_note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meaning_synonyms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<Id>,
}

impl RequestParams for StudyMaterialCreateParams {
    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

/// Changes to an existing study material
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudyMaterialUpdateParams {
    #[serde(skip)]
    pub id: Id,

    #[serde(skip)]
    pub options: RequestOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning_note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meaning_synonyms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_note: Option<String>,
}

impl RequestParams for StudyMaterialUpdateParams {
    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

#[derive(Serialize)]
struct StudyMaterialBody<'a, P: Serialize> {
    study_material: &'a P,
}

impl Client {
    /// Create a study material for a subject
    pub async fn study_material_create(
        &self,
        params: &StudyMaterialCreateParams,
    ) -> Result<StudyMaterial> {
        let body = StudyMaterialBody {
            study_material: params,
        };
        self.post("/v2/study_materials", params, &body).await
    }

    /// Retrieve a specific study material
    pub async fn study_material_get(&self, params: &GetParams) -> Result<StudyMaterial> {
        self.get(&format!("/v2/study_materials/{}", params.id), params)
            .await
    }

    /// List study materials, ordered by ascending creation time, 500 at a time
    pub async fn study_material_list(
        &self,
        params: &StudyMaterialListParams,
    ) -> Result<StudyMaterialPage> {
        self.get("/v2/study_materials", params).await
    }

    /// Update a study material's notes and synonyms
    pub async fn study_material_update(
        &self,
        params: &StudyMaterialUpdateParams,
    ) -> Result<StudyMaterial> {
        let body = StudyMaterialBody {
            study_material: params,
        };
        self.put(&format!("/v2/study_materials/{}", params.id), params, &body)
            .await
    }
}
