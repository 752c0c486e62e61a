use axum::{Json, extract::State};

use mood_types::api::StatsResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stats — label counts plus the recent trend.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(stats))
}
