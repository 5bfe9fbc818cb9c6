use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version, for monitoring.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "profile-service",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment
    }))
}

/// GET /
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Candidate Profile Service",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health"
    }))
}
