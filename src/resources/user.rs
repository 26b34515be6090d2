//! The authenticated user

use crate::error::Result;
use crate::http::Client;
use crate::object::Object;
use crate::query::{RequestOptions, RequestParams};
use crate::types::{Id, ObjectType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub object: Object,

    #[serde(default)]
    pub data: Option<UserData>,
}

impl_api_object!(User, [ObjectType::User]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserData {
    pub current_vacation_started_at: Option<DateTime<Utc>>,
    /// Account UUID; not a resource identifier
    pub id: String,
    pub level: i32,
    pub preferences: Option<UserPreferences>,
    pub profile_url: String,
    pub started_at: DateTime<Utc>,
    pub subscription: Option<UserSubscription>,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub default_voice_actor_id: Id,
    pub lessons_autoplay_audio: bool,
    pub lessons_batch_size: i32,
    pub lessons_presentation_order: String,
    pub reviews_autoplay_audio: bool,
    pub reviews_display_srs_indicator: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSubscription {
    pub active: bool,
    pub max_level_granted: i32,
    pub period_ends_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Changes to the user's preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdateParams {
    #[serde(skip)]
    pub options: RequestOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserUpdatePreferencesParams>,
}

impl RequestParams for UserUpdateParams {
    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdatePreferencesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_voice_actor_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons_autoplay_audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons_batch_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons_presentation_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_autoplay_audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_display_srs_indicator: Option<bool>,
}

#[derive(Serialize)]
struct UserUpdateBody<'a> {
    user: &'a UserUpdateParams,
}

impl Client {
    /// Retrieve the user associated with the API token
    pub async fn user_get(&self, options: &RequestOptions) -> Result<User> {
        self.get("/v2/user", options).await
    }

    /// Update the user's preferences
    pub async fn user_update(&self, params: &UserUpdateParams) -> Result<User> {
        let body = UserUpdateBody { user: params };
        self.put("/v2/user", params, &body).await
    }
}
