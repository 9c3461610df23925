use axum::{extract::State, Json};

use crate::{
    error::{AppError, AppResult},
    models::{ContentSubmission, VerificationResult},
    routes::AppState,
};

/// Handler for content classification endpoint
///
/// Remote failures never reach the caller; they show up as a degraded
/// result instead.
pub async fn classify(
    State(state): State<AppState>,
    Json(submission): Json<ContentSubmission>,
) -> AppResult<Json<VerificationResult>> {
    if submission.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title is required".to_string()));
    }

    let result = state.gateway.verify(&submission).await;
    Ok(Json(result))
}
