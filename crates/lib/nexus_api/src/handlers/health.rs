//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use chrono::{SecondsFormat, Utc};
use nexus_core::wire::HealthResponse;

use crate::AppState;

/// `GET /health`: liveness plus the modes this relay accepts.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        modes: state.relay.registry().modes(),
    })
}
