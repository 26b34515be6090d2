//! Resource accessors
//!
//! One module per API resource. Each declares the resource's JSON shape, its
//! parameter types, and a thin `impl Client` block that names the path and
//! decode target. All request behavior lives in the engine.

// Must stay above the `mod` declarations.
/// Implement [`ApiObject`](crate::object::ApiObject) for a resource with a
/// flattened `object` field
macro_rules! impl_api_object {
    ($ty:ty, [$($kind:expr),+ $(,)?]) => {
        impl $crate::object::ApiObject for $ty {
            fn object(&self) -> &$crate::object::Object {
                &self.object
            }

            fn object_mut(&mut self) -> &mut $crate::object::Object {
                &mut self.object
            }

            fn expected_object_types() -> &'static [$crate::types::ObjectType] {
                &[$($kind),+]
            }
        }
    };
}

mod assignment;
mod level_progression;
mod reset;
mod review;
mod review_statistic;
mod spaced_repetition_system;
mod study_material;
mod subject;
mod summary;
mod user;
mod voice_actor;

pub use assignment::{
    Assignment, AssignmentData, AssignmentListParams, AssignmentPage, AssignmentStartParams,
};
pub use level_progression::{
    LevelProgression, LevelProgressionData, LevelProgressionListParams, LevelProgressionPage,
};
pub use reset::{Reset, ResetData, ResetListParams, ResetPage};
pub use review::{Review, ReviewCreateParams, ReviewData, ReviewListParams, ReviewPage};
pub use review_statistic::{
    ReviewStatistic, ReviewStatisticData, ReviewStatisticListParams, ReviewStatisticPage,
};
pub use spaced_repetition_system::{
    SpacedRepetitionSystem, SpacedRepetitionSystemData, SpacedRepetitionSystemListParams,
    SpacedRepetitionSystemPage, SpacedRepetitionSystemStage,
};
pub use study_material::{
    StudyMaterial, StudyMaterialCreateParams, StudyMaterialData, StudyMaterialListParams,
    StudyMaterialPage, StudyMaterialUpdateParams,
};
pub use subject::{
    Subject, SubjectAuxiliaryMeaning, SubjectCommonData, SubjectContextSentence, SubjectData,
    SubjectKanaVocabularyData, SubjectKanjiData, SubjectKanjiReading, SubjectListParams,
    SubjectMeaning, SubjectPage, SubjectPronunciationAudio, SubjectRadicalCharacterImage,
    SubjectRadicalData, SubjectVocabularyData, SubjectVocabularyReading,
};
pub use summary::{Summary, SummaryData, SummaryLesson, SummaryReview};
pub use user::{
    User, UserData, UserPreferences, UserSubscription, UserUpdateParams,
    UserUpdatePreferencesParams,
};
pub use voice_actor::{VoiceActor, VoiceActorData, VoiceActorListParams, VoiceActorPage};

use crate::query::{RequestOptions, RequestParams};
use crate::types::Id;

/// Parameters for fetching a single resource by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetParams {
    pub id: Id,
    pub options: RequestOptions,
}

impl GetParams {
    /// Parameters for the resource with this identifier
    pub fn new(id: Id) -> Self {
        Self {
            id,
            options: RequestOptions::default(),
        }
    }

    /// Attach request options
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

impl RequestParams for GetParams {
    fn options(&self) -> &RequestOptions {
        &self.options
    }
}
