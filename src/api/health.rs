use axum::response::Json;
use serde_json::{Value, json};

use crate::error::ApiError;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Fallback for every route the router does not know.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
