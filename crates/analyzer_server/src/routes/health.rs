use std::sync::Arc;

use analyzer_constant::app::HEALTH_STATUS;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::timestamp;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub timestamp: String,
}

/// GET /health: liveness plus the configured model; never calls the model.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS,
        model: state.gateway.model().to_string(),
        timestamp: timestamp(),
    })
}
