use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use mood_types::Entry;
use mood_types::api::{CreateEntryRequest, CreatedEntryResponse, MessageResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/entries — every entry, most recent first.
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, ApiError> {
    let entries = state.store.list().await?;
    Ok(Json(entries))
}

/// POST /api/entries — classify and store `{text}`.
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<Json<CreatedEntryResponse>, ApiError> {
    let Json(req) = payload?;
    let text = req.text.unwrap_or_default();

    let entry = state.store.create(&text).await?;
    Ok(Json(entry.into()))
}

/// DELETE /api/entries/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;

    state.store.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Entry deleted successfully".to_string(),
    }))
}
