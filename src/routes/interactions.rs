use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{ContentSubmission, InteractionType},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    pub user_id: String,
    pub content_id: String,
    pub content: ContentSubmission,
    pub interaction_type: InteractionType,
}

/// Handler for interaction tracking endpoint
///
/// Responds before delivery; `queued` is false when the event was dropped.
pub async fn track(
    State(state): State<AppState>,
    Json(request): Json<InteractionRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    if request.user_id.trim().is_empty() || request.content_id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "userId and contentId are required".to_string(),
        ));
    }

    let queued = state.tracker.track(
        &request.user_id,
        &request.content_id,
        &request.content,
        request.interaction_type,
    );

    Ok((StatusCode::ACCEPTED, Json(json!({ "queued": queued }))))
}
