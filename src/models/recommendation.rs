use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a recommendation came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Platform content selected by the (external) ranking system
    Internal,
    /// Fetched from the external video search service
    External,
    /// Hand-curated list served when the search service is unavailable
    InternalStatic,
}

/// A single entry in a recommendation feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub source_url: String,
    pub origin: Origin,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Normalized result from the external video search service
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSearchResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub channel_title: String,
    pub watch_url: String,
}

impl RecommendationItem {
    /// Converts a search result into an external-origin recommendation
    pub fn from_search_result(result: VideoSearchResult, category: String) -> Self {
        Self {
            id: result.id,
            title: result.title,
            description: result.description,
            thumbnail_url: result.thumbnail_url,
            source_url: result.watch_url,
            origin: Origin::External,
            category,
            channel_title: Some(result.channel_title),
            published_at: result.published_at,
        }
    }
}

/// Query sent to the external video search service
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSearchQuery {
    pub phrase: String,
    pub max_results: usize,
}

impl VideoSearchQuery {
    pub fn new(phrase: impl Into<String>, max_results: usize) -> Self {
        Self {
            phrase: phrase.into(),
            max_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_serialization() {
        assert_eq!(serde_json::to_string(&Origin::External).unwrap(), "\"external\"");
        assert_eq!(
            serde_json::to_string(&Origin::InternalStatic).unwrap(),
            "\"internal-static\""
        );
    }

    #[test]
    fn test_from_search_result_marks_external_origin() {
        let result = VideoSearchResult {
            id: "abc123".to_string(),
            title: "Docker in 100 Seconds".to_string(),
            description: "containers explained".to_string(),
            thumbnail_url: "https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string(),
            published_at: None,
            channel_title: "Fireship".to_string(),
            watch_url: "https://www.youtube.com/watch?v=abc123".to_string(),
        };

        let item = RecommendationItem::from_search_result(result, "devops".to_string());
        assert_eq!(item.origin, Origin::External);
        assert_eq!(item.source_url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(item.channel_title.as_deref(), Some("Fireship"));
        assert_eq!(item.category, "devops");
    }
}
