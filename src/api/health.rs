//! Health check endpoint

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::core::RouteSurface;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub surface: RouteSurface,
}

// Nothing is held between requests, so a running process is a healthy one.
pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "embedding-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        surface: app_state.handler.router().surface(),
    })
}
