use axum::{Json, extract::State};
use tracing::warn;

use mood_types::api::HealthResponse;

use crate::state::AppState;

/// GET /health — always 200 so a degraded start is still observable.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
        classifier: state.store.classifier().mode().as_str().to_string(),
    })
}
