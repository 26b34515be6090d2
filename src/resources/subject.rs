//! Subjects
//!
//! Radicals, kanji, vocabulary and kana-only vocabulary. The shape of `data`
//! depends on the `object` discriminator, so decoding goes through
//! [`RawSubject`] and dispatches on the type.

use super::GetParams;
use crate::error::Result;
use crate::http::Client;
use crate::object::{Object, Page};
use crate::query::{ListParams, QueryEncoder, RequestOptions, RequestParams};
use crate::types::{Id, ObjectType, WkTime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A radical, kanji, or vocabulary item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSubject")]
pub struct Subject {
    #[serde(flatten)]
    pub object: Object,

    /// Type-specific data; `None` when absent or the type is unknown
    pub data: Option<SubjectData>,
}

impl_api_object!(
    Subject,
    [
        ObjectType::Kanji,
        ObjectType::KanaVocabulary,
        ObjectType::Radical,
        ObjectType::Vocabulary,
    ]
);

impl Subject {
    /// Kanji data, if this is a kanji
    pub fn kanji(&self) -> Option<&SubjectKanjiData> {
        match &self.data {
            Some(SubjectData::Kanji(data)) => Some(data),
            _ => None,
        }
    }

    /// Radical data, if this is a radical
    pub fn radical(&self) -> Option<&SubjectRadicalData> {
        match &self.data {
            Some(SubjectData::Radical(data)) => Some(data),
            _ => None,
        }
    }

    /// Vocabulary data, if this is a vocabulary item
    pub fn vocabulary(&self) -> Option<&SubjectVocabularyData> {
        match &self.data {
            Some(SubjectData::Vocabulary(data)) => Some(data),
            _ => None,
        }
    }

    /// Kana-only vocabulary data, if this is one
    pub fn kana_vocabulary(&self) -> Option<&SubjectKanaVocabularyData> {
        match &self.data {
            Some(SubjectData::KanaVocabulary(data)) => Some(data),
            _ => None,
        }
    }
}

/// Wire form before dispatching on the object type
#[derive(Deserialize)]
struct RawSubject {
    #[serde(flatten)]
    object: Object,

    #[serde(default)]
    data: Option<Value>,
}

impl TryFrom<RawSubject> for Subject {
    type Error = String;

    fn try_from(raw: RawSubject) -> std::result::Result<Self, Self::Error> {
        let data = match (raw.object.object_type, raw.data) {
            (Some(kind), Some(data)) if !data.is_null() => decode_data(kind, data)?,
            _ => None,
        };

        Ok(Self {
            object: raw.object,
            data,
        })
    }
}

fn decode_data(kind: ObjectType, data: Value) -> std::result::Result<Option<SubjectData>, String> {
    let decoded = match kind {
        ObjectType::Kanji => serde_json::from_value(data).map(SubjectData::Kanji),
        ObjectType::KanaVocabulary => {
            serde_json::from_value(data).map(SubjectData::KanaVocabulary)
        }
        ObjectType::Radical => serde_json::from_value(data).map(SubjectData::Radical),
        ObjectType::Vocabulary => serde_json::from_value(data).map(SubjectData::Vocabulary),
        _ => return Ok(None),
    };

    decoded
        .map(Some)
        .map_err(|e| format!("decoding {kind} from subject: {e}"))
}

/// Type-specific subject data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubjectData {
    Kanji(SubjectKanjiData),
    KanaVocabulary(SubjectKanaVocabularyData),
    Radical(SubjectRadicalData),
    Vocabulary(SubjectVocabularyData),
}

/// Fields shared by every subject type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectCommonData {
    pub auxiliary_meanings: Vec<SubjectAuxiliaryMeaning>,
    pub created_at: DateTime<Utc>,
    pub document_url: String,
    pub hidden_at: Option<DateTime<Utc>>,
    pub level: i32,
    pub lesson_position: i32,
    pub meaning_mnemonic: String,
    pub meanings: Vec<SubjectMeaning>,
    pub slug: String,
    pub spaced_repetition_system_id: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectKanjiData {
    #[serde(flatten)]
    pub common: SubjectCommonData,

    pub amalgamation_subject_ids: Vec<Id>,
    pub characters: String,
    pub component_subject_ids: Vec<Id>,
    pub meaning_hint: Option<String>,
    pub reading_hint: Option<String>,
    pub reading_mnemonic: String,
    pub readings: Vec<SubjectKanjiReading>,
    pub visually_similar_subject_ids: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectKanjiReading {
    pub accepted_answer: bool,
    pub primary: bool,
    pub reading: String,
    /// `kunyomi`, `nanori` or `onyomi`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectRadicalData {
    #[serde(flatten)]
    pub common: SubjectCommonData,

    pub amalgamation_subject_ids: Vec<Id>,
    pub character_images: Vec<SubjectRadicalCharacterImage>,
    /// Absent for radicals that only exist as images
    pub characters: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectRadicalCharacterImage {
    pub content_type: String,
    pub metadata: Map<String, Value>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectVocabularyData {
    #[serde(flatten)]
    pub common: SubjectCommonData,

    pub characters: String,
    pub component_subject_ids: Vec<Id>,
    pub context_sentences: Vec<SubjectContextSentence>,
    pub parts_of_speech: Vec<String>,
    pub pronunciation_audios: Vec<SubjectPronunciationAudio>,
    pub reading_mnemonic: String,
    pub readings: Vec<SubjectVocabularyReading>,
}

/// Vocabulary written only in kana; has no readings or components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectKanaVocabularyData {
    #[serde(flatten)]
    pub common: SubjectCommonData,

    pub characters: String,
    pub context_sentences: Vec<SubjectContextSentence>,
    pub parts_of_speech: Vec<String>,
    pub pronunciation_audios: Vec<SubjectPronunciationAudio>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectContextSentence {
    /// English translation
    pub en: String,
    /// Japanese sentence
    pub ja: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectPronunciationAudio {
    pub content_type: String,
    pub metadata: Map<String, Value>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectVocabularyReading {
    pub accepted_answer: bool,
    pub primary: bool,
    pub reading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectAuxiliaryMeaning {
    pub meaning: String,
    /// `whitelist` or `blacklist`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectMeaning {
    pub accepted_answer: bool,
    pub meaning: String,
    pub primary: bool,
}

pub type SubjectPage = Page<Subject>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectListParams {
    pub list_params: ListParams,
    pub options: RequestOptions,

    pub hidden: Option<bool>,
    pub ids: Vec<Id>,
    pub levels: Vec<i32>,
    pub slugs: Vec<String>,
    pub types: Vec<ObjectType>,
    pub updated_after: Option<WkTime>,
}

impl RequestParams for SubjectListParams {
    fn encode_to_query(&self) -> String {
        let mut query = QueryEncoder::new();
        self.list_params.encode_into(&mut query);
        query
            .opt("hidden", &self.hidden)
            .list("ids", &self.ids)
            .list("levels", &self.levels)
            .list("slugs", &self.slugs)
            .list("types", &self.types)
            .opt("updated_after", &self.updated_after);
        query.finish()
    }

    fn options(&self) -> &RequestOptions {
        &self.options
    }
}

impl Client {
    /// Retrieve a specific subject
    pub async fn subject_get(&self, params: &GetParams) -> Result<Subject> {
        self.get(&format!("/v2/subjects/{}", params.id), params).await
    }

    /// List subjects, ordered by ascending identifier, 1000 at a time
    pub async fn subject_list(&self, params: &SubjectListParams) -> Result<SubjectPage> {
        self.get("/v2/subjects", params).await
    }
}
