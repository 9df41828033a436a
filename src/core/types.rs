//! Core data types for the Tawfiq service.
//!
//! This module defines all data structures used throughout the
//! application: the Quran and Hadith domain records, conversation
//! turns, and the request/response payloads of the three public
//! operations.

use serde::{Deserialize, Serialize};

/// A single verse (ayah) within a surah
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verse {
    /// In-surah ordinal, 1-based and contiguous
    pub number: u16,

    /// Arabic text
    pub arabic: String,

    /// English translation
    pub translation: String,

    /// Latin-script transliteration, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,

    /// Recitation audio URL, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// One of the 114 chapters of the Quran
///
/// Verse order is recitation order and is never reordered after
/// load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surah {
    /// Surah number, 1 through 114, unique within the corpus
    pub number: u16,

    /// Canonical English name (e.g. "Al-Fatihah")
    pub name: String,

    /// Alternate names and spellings used for free-text resolution
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Ordered verse sequence
    pub verses: Vec<Verse>,
}

/// A single hadith record
///
/// Every metadata field beyond number/title/text is independently
/// optional; records with missing metadata still participate in
/// matching on the fields they do have.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HadithRecord {
    /// Stable sequence number, unique within the corpus
    pub number: u32,

    /// Short title or info line
    pub title: String,

    /// Full hadith text (display only, not indexed for matching)
    pub text: String,

    /// Topic label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Narrator attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,

    /// Collection name (e.g. "Sahih Bukhari")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,

    /// Book number within the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_number: Option<u32>,

    /// Volume number within the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_number: Option<u32>,
}

impl HadithRecord {
    /// Lowercase haystack used for matching: title plus topic.
    ///
    /// An absent topic contributes nothing rather than excluding
    /// the record.
    pub fn haystack(&self) -> String {
        match &self.topic {
            Some(topic) => format!("{} {}", self.title, topic).to_lowercase(),
            None => self.title.to_lowercase(),
        }
    }
}

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a caller-supplied conversation history
///
/// The server never persists turns; the full history arrives with
/// every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    /// Genuine completion from the external provider
    Model,

    /// Built-in knowledge base, no provider round trip
    Knowledge,

    /// Fixed apologetic message after a provider failure
    Fallback,
}

/// Normalized answer produced by the completion gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Clean answer text (markdown heading markers stripped)
    pub answer: String,

    /// Provenance flag
    pub source: AnswerSource,
}

/// Request body for `POST /api/v1/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Ordered conversation, oldest first, ending in the newest
    /// user turn
    pub history: Vec<ConversationTurn>,
}

/// Response body for `POST /api/v1/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub source: AnswerSource,
}

impl From<CompletionResult> for AskResponse {
    fn from(result: CompletionResult) -> Self {
        Self {
            answer: result.answer,
            source: result.source,
        }
    }
}

/// Query field of a quran-query request: the reference client sends
/// either a number (dropdown) or a string (search box)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuranQueryInput {
    Number(u32),
    Text(String),
}

/// Request body for `POST /api/v1/quran-query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuranQueryRequest {
    pub query: QuranQueryInput,
}

/// Response body for `POST /api/v1/quran-query`
///
/// NotFound is a valid 2xx response, not an error: the UI treats
/// "no result found" the same as an empty section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuranQueryResponse {
    Found {
        surah_name: String,
        surah_number: u16,
        verses: Vec<Verse>,
    },
    NoResult {
        result: String,
    },
}

impl QuranQueryResponse {
    /// The uniform empty-result body
    pub fn no_result() -> Self {
        Self::NoResult {
            result: "no result found".to_string(),
        }
    }
}

impl From<&Surah> for QuranQueryResponse {
    fn from(surah: &Surah) -> Self {
        Self::Found {
            surah_name: surah.name.clone(),
            surah_number: surah.number,
            verses: surah.verses.clone(),
        }
    }
}

/// Request body for `POST /api/v1/hadith-query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HadithQueryRequest {
    /// Free-text query matched against title + topic
    #[serde(default)]
    pub query: String,

    /// Topic filter, matched the same way
    #[serde(default)]
    pub topic: String,

    /// Range bound: "all" (default) or "firstN" (e.g. "first100")
    #[serde(default)]
    pub range: String,
}

/// Response body for `POST /api/v1/hadith-query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HadithQueryResponse {
    /// Matching records in corpus order
    pub results: Vec<HadithRecord>,

    /// Number of results returned
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Loaded surah count
    pub surahs: usize,

    /// Loaded hadith record count
    pub hadith_records: usize,
}
