use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{RecommendationItem, UserInterestProfile},
    routes::AppState,
};

const DEFAULT_COUNT: usize = 8;
const MAX_COUNT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub profile: UserInterestProfile,
    pub count: Option<usize>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<RecommendationItem>>> {
    let count = request.count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT);
    let recommendations = state.fetcher.fetch(&request.profile, count).await;
    Ok(Json(recommendations))
}
