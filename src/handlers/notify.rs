use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::errors::ApiError;
use crate::state::AppState;

// POST /notify — pass-through to the external messaging API. One
// attempt, no retry; the failure is surfaced in the error envelope.
pub async fn send(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::Validation("message is required".to_string()))?;

    let message_id = state
        .notifier
        .send(message)
        .await
        .map_err(|e| ApiError::Notify(e.to_string()))?;

    let mut response = Map::new();
    response.insert("success".to_string(), Value::Bool(true));
    if let Some(id) = message_id {
        response.insert("message_id".to_string(), json!(id));
    }
    Ok(Json(Value::Object(response)))
}
