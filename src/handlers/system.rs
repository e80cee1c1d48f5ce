// handlers/system.rs - GET / and GET /health

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "gentle-reflect",
        "version": version,
        "description": "Gentle AI reflections for journal, dream and mood entries",
        "endpoints": {
            "reflect": "POST /gentle-ai, POST /functions/v1/gentle-ai",
            "weekly_summary": "POST /summaries/weekly",
            "health": "GET /health",
        }
    }))
}

/// Liveness only; never calls the gateway
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "credential_configured": state.reflections.is_configured(),
        "model": state.reflections.model(),
    }))
}
