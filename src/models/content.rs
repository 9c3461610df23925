use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Category assigned to content judged not tech-related
pub const NON_TECH_CATEGORY: &str = "non_tech";

/// Category used when a tech submission matches no specific domain
pub const GENERAL_CATEGORY: &str = "general";

/// Confidence reported when every stage was answered by the remote classifiers.
///
/// The classifier service exposes no score of its own, so this is a provenance
/// marker rather than a probability and must not be compared across requests.
pub const REMOTE_CONFIDENCE: f32 = 0.85;

/// Confidence reported when any stage degraded to the keyword fallback
pub const FALLBACK_CONFIDENCE: f32 = 0.0;

/// Kind of user-submitted content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Video,
    Short,
}

impl ContentKind {
    /// Videos and shorts are classified from their transcript
    pub fn is_video_like(&self) -> bool {
        matches!(self, ContentKind::Video | ContentKind::Short)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Video => "video",
            ContentKind::Short => "short",
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submission awaiting classification before it can be published
///
/// `body` holds the article text, or the transcript for videos and shorts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentSubmission {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    pub kind: ContentKind,
}

impl ContentSubmission {
    pub fn new(
        kind: ContentKind,
        title: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            body: body.into(),
            kind,
        }
    }

    /// Title, description and body joined for keyword matching
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.body)
    }
}

/// Outcome of classifying one submission
///
/// Every submission receives exactly one of these, including when every remote
/// call failed. Degraded outcomes carry `requires_manual_review = true` or a
/// fallback confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_tech_related: bool,
    pub category: String,
    pub confidence: f32,
    pub requires_manual_review: bool,
    /// Text actually sent to the classifiers
    pub sampled_text: String,
    pub message: String,
}

impl VerificationResult {
    /// Tech-related content with an assigned domain
    pub fn tech(category: String, sampled_text: String, authoritative: bool, manual_review: bool) -> Self {
        let message = if manual_review {
            format!(
                "Classifier unavailable; content matched tech keywords and was filed under: {}. Pending manual review.",
                category
            )
        } else {
            format!(
                "Content verified as tech-related and classified as: {}",
                category
            )
        };

        Self {
            is_tech_related: true,
            category,
            confidence: if authoritative {
                REMOTE_CONFIDENCE
            } else {
                FALLBACK_CONFIDENCE
            },
            requires_manual_review: manual_review,
            sampled_text,
            message,
        }
    }

    /// Content judged outside the platform's scope
    pub fn non_tech(sampled_text: String, authoritative: bool) -> Self {
        Self {
            is_tech_related: false,
            category: NON_TECH_CATEGORY.to_string(),
            confidence: if authoritative {
                REMOTE_CONFIDENCE
            } else {
                FALLBACK_CONFIDENCE
            },
            requires_manual_review: !authoritative,
            sampled_text,
            message: "Content may not be tech-related. You can request manual verification."
                .to_string(),
        }
    }

    /// A video or short submitted without a transcript; nothing was classified
    pub fn transcript_missing(kind: ContentKind) -> Self {
        Self {
            is_tech_related: false,
            category: GENERAL_CATEGORY.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            requires_manual_review: true,
            sampled_text: String::new(),
            message: format!(
                "No transcript was provided for this {}; it has been queued for manual review.",
                kind
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_serialization() {
        assert_eq!(serde_json::to_string(&ContentKind::Short).unwrap(), "\"short\"");
        let kind: ContentKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(kind, ContentKind::Video);
    }

    #[test]
    fn test_video_like_kinds() {
        assert!(ContentKind::Video.is_video_like());
        assert!(ContentKind::Short.is_video_like());
        assert!(!ContentKind::Article.is_video_like());
    }

    #[test]
    fn test_submission_defaults_missing_text_fields() {
        let submission: ContentSubmission =
            serde_json::from_str(r#"{"title": "Clip", "kind": "short"}"#).unwrap();
        assert_eq!(submission.description, "");
        assert_eq!(submission.body, "");
    }

    #[test]
    fn test_verification_result_uses_camel_case() {
        let result = VerificationResult::non_tech("sample".to_string(), true);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isTechRelated"], false);
        assert_eq!(json["requiresManualReview"], false);
        assert_eq!(json["category"], NON_TECH_CATEGORY);
    }

    #[test]
    fn test_fallback_results_are_distinguishable() {
        let remote = VerificationResult::tech("web".to_string(), String::new(), true, false);
        let degraded = VerificationResult::tech("web".to_string(), String::new(), false, true);
        assert!(remote.confidence > degraded.confidence);
        assert!(degraded.requires_manual_review);
    }

    #[test]
    fn test_transcript_missing_requires_review() {
        let result = VerificationResult::transcript_missing(ContentKind::Video);
        assert!(result.requires_manual_review);
        assert!(!result.is_tech_related);
        assert!(result.message.contains("video"));
    }
}
