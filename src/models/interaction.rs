use serde::{Deserialize, Serialize};

use super::{ContentKind, ContentSubmission};

/// User engagement recorded for personalization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Like,
    Save,
    Unsave,
    Comment,
}

/// Payload sent to the interaction tracking sink, in the sink's snake_case wire format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionEvent {
    pub user_id: String,
    pub content_id: String,
    pub content_type: ContentKind,
    pub title: String,
    pub description: String,
    pub text: String,
    pub interaction_type: InteractionType,
}

impl InteractionEvent {
    pub fn new(
        user_id: &str,
        content_id: &str,
        content: &ContentSubmission,
        interaction_type: InteractionType,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            content_id: content_id.to_string(),
            content_type: content.kind,
            title: content.title.clone(),
            description: content.description.clone(),
            text: content.body.clone(),
            interaction_type,
        }
    }
}
