//! Voice actors

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use serde::{Deserialize, Serialize};

/// A voice actor used for vocabulary pronunciation audio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceActor {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<VoiceActorData>,
}

impl_api_object!(VoiceActor, [ObjectType::VoiceActor]);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceActorData {
    pub description: String,
    pub gender: String,
    pub name: String,
}

pub type VoiceActorPage = Page<VoiceActor>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceActorListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub ids: Vec<Id>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for VoiceActorListParams {
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
    pub async fn voice_actor_get(&self, params: &GetParams) -> Result<VoiceActor> {
        self.get(&format!("/v2/voice_actors/{}", params.id), params)
            .await
    }

    pub async fn voice_actor_list(&self, params: &VoiceActorListParams) -> Result<VoiceActorPage> {
        self.get("/v2/voice_actors", params).await
    }
}
