pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parser::document::MAX_FILE_SIZE;
use crate::parser::handlers;
use crate::state::AppState;

/// Request body ceiling. Leaves headroom above the file limit so oversized
/// uploads reach the validator and get a FILE_TYPE error.
const BODY_LIMIT: usize = MAX_FILE_SIZE + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/parse", post(handlers::handle_parse))
        .route("/api/v1/resumes/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/resumes/suggestions",
            post(handlers::handle_suggestions),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}
