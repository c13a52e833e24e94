use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Document Information Extraction API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /extract": "Extract information from PDF or TXT documents",
            "GET /health": "Health check endpoint",
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub extractor_ready: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        extractor_ready: state.is_ready(),
    })
}
