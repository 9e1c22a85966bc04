pub mod health;
pub mod lookup;
pub mod translate;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Lookup
        .route("/isbn", get(lookup::lookup_isbn))
        .route("/lookup/:isbn", get(lookup::lookup_book))
        // Translation
        .route("/translate", post(translate::translate))
        .with_state(state)
}
