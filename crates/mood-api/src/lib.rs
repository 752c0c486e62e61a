pub mod entries;
pub mod error;
pub mod health;
pub mod pages;
pub mod state;
pub mod stats;
pub mod store;

use axum::{
    Router,
    routing::{delete, get},
};

pub use error::ApiError;
pub use state::{AppState, AppStateInner};
pub use store::{EntryStore, StoreError};

/// All routes of the journal. Cross-cutting layers (CORS, tracing) are
/// added by the server binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health::health))
        .route(
            "/api/entries",
            get(entries::list_entries).post(entries::create_entry),
        )
        .route("/api/entries/{id}", delete(entries::delete_entry))
        .route("/api/stats", get(stats::get_stats))
        .with_state(state)
}
