//! Common types used throughout the client
//!
//! Identifiers, the parameter-side timestamp, the object type discriminator,
//! and the HTTP methods the API accepts.

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// A WaniKani resource identifier
///
/// Unique across all resource kinds. Also used as a pagination cursor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Id(pub i64);

impl Id {
    /// Underlying integer
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for Id {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Id> for i64 {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Id {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

// ============================================================================
// Parameter Timestamp
// ============================================================================

/// A timestamp used in request parameters
///
/// Always encodes to RFC3339 with an explicit offset (`Z` for UTC) and
/// decodes only from RFC3339. Response fields use `chrono::DateTime<Utc>`
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WkTime(DateTime<FixedOffset>);

impl WkTime {
    /// Current time in UTC
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Parse an RFC3339 string
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(Self)
    }

    /// Encode to the RFC3339 form the API expects
    pub fn encode(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Encode to the HTTP date grammar used by `If-Modified-Since`
    pub fn to_http_date(&self) -> String {
        self.0
            .with_timezone(&Utc)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    /// The wrapped instant
    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for WkTime {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl fmt::Display for WkTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for WkTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for WkTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Object Type
// ============================================================================

/// Discriminator carried in the `object` field of every resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Assignment,
    Collection,
    KanaVocabulary,
    Kanji,
    LevelProgression,
    Radical,
    Report,
    Reset,
    Review,
    ReviewStatistic,
    SpacedRepetitionSystem,
    StudyMaterial,
    User,
    Vocabulary,
    VoiceActor,
    /// A type this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl ObjectType {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Collection => "collection",
            Self::KanaVocabulary => "kana_vocabulary",
            Self::Kanji => "kanji",
            Self::LevelProgression => "level_progression",
            Self::Radical => "radical",
            Self::Report => "report",
            Self::Reset => "reset",
            Self::Review => "review",
            Self::ReviewStatistic => "review_statistic",
            Self::SpacedRepetitionSystem => "spaced_repetition_system",
            Self::StudyMaterial => "study_material",
            Self::User => "user",
            Self::Vocabulary => "vocabulary",
            Self::VoiceActor => "voice_actor",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HTTP Method
// ============================================================================

/// HTTP methods used by the API (there is no DELETE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
}

impl Method {
    /// Upper-case method name
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}
