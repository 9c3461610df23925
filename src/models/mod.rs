use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod content;
pub mod interaction;
pub mod profile;
pub mod recommendation;

pub use content::{
    ContentKind, ContentSubmission, VerificationResult, FALLBACK_CONFIDENCE, GENERAL_CATEGORY,
    NON_TECH_CATEGORY, REMOTE_CONFIDENCE,
};
pub use interaction::{InteractionEvent, InteractionType};
pub use profile::UserInterestProfile;
pub use recommendation::{Origin, RecommendationItem, VideoSearchQuery, VideoSearchResult};

// ============================================================================
// Classifier API Types
// ============================================================================

/// Request body shared by `/predict_tech` and `/predict_domain`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassifierRequest {
    pub title: String,
    pub description: String,
    pub content: String,
}

impl ClassifierRequest {
    pub fn new(submission: &ContentSubmission, content: String) -> Self {
        Self {
            title: submission.title.clone(),
            description: submission.description.clone(),
            content,
        }
    }
}

/// Response from a classifier endpoint, reduced to the shapes it is known to use
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedClassifierResponse {
    /// JSON object carrying the expected field (`result` or `domain`)
    Structured(String),
    /// Bare string, either a JSON string or a single-line `text/plain` body
    Raw(String),
    /// Anything else, including HTML error pages
    Unrecognized,
}

impl ParsedClassifierResponse {
    /// Parses a response body, looking for `field` in object responses
    ///
    /// Non-JSON bodies are only accepted when the response was declared
    /// `text/plain` (`plain_text`) and hold a single line without markup.
    pub fn from_body(body: &str, field: &str, plain_text: bool) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return ParsedClassifierResponse::Unrecognized;
        }

        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Object(map)) => {
                if let Some(value) = map.get(field).and_then(|v| v.as_str()) {
                    ParsedClassifierResponse::Structured(value.to_string())
                } else if let Some(value) = map.get("prediction").and_then(|v| v.as_str()) {
                    ParsedClassifierResponse::Raw(value.to_string())
                } else {
                    ParsedClassifierResponse::Unrecognized
                }
            }
            Ok(serde_json::Value::String(value)) => ParsedClassifierResponse::Raw(value),
            Ok(_) => ParsedClassifierResponse::Unrecognized,
            Err(_) if plain_text && !looks_like_markup(trimmed) => {
                ParsedClassifierResponse::Raw(trimmed.to_string())
            }
            Err(_) => ParsedClassifierResponse::Unrecognized,
        }
    }
}

fn looks_like_markup(text: &str) -> bool {
    text.contains('<') || text.contains('>') || text.contains('\n') || text.contains('\r')
}

// ============================================================================
// Video Search API Types
// ============================================================================

/// Raw response from `GET /search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: SearchThumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchThumbnails {
    #[serde(default)]
    pub high: Option<SearchThumbnail>,
    #[serde(default)]
    pub medium: Option<SearchThumbnail>,
    #[serde(default, rename = "default")]
    pub base: Option<SearchThumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchThumbnail {
    pub url: String,
}

impl SearchItem {
    /// Converts a raw search item, skipping entries that are not videos
    pub fn into_result(self) -> Option<VideoSearchResult> {
        let id = self.id.video_id?;
        let thumbnails = self.snippet.thumbnails;
        let thumbnail_url = thumbnails
            .high
            .or(thumbnails.medium)
            .or(thumbnails.base)
            .map(|t| t.url)
            .unwrap_or_default();

        Some(VideoSearchResult {
            watch_url: format!("https://www.youtube.com/watch?v={}", id),
            id,
            title: self.snippet.title,
            description: self.snippet.description,
            thumbnail_url,
            published_at: self.snippet.published_at,
            channel_title: self.snippet.channel_title,
        })
    }
}
