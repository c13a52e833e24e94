mod error;
mod extract;
mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/extract", post(extract::extract))
}

/// The full service: routes plus CORS, tracing and the upload size limit.
pub fn app(state: AppState) -> Router {
    let limit = state.config.max_upload_bytes;
    router()
        .layer(DefaultBodyLimit::max(limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
