use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::resource::iso_timestamp;

// GET /test
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API is up",
        "timestamp": iso_timestamp(Utc::now()),
    }))
}
