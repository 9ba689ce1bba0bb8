use axum::response::Json;
use serde_json::{json, Value};

use crate::utils::logging::*;

/// GET /
pub async fn root() -> Json<Value> {
    log_health_check();
    Json(json!({ "message": "Adam Assistant Backend is running" }))
}

/// GET /test
pub async fn test_status() -> Json<Value> {
    Json(json!({ "status": "API is running" }))
}

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "adam-assistant-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
