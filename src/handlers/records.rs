use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::ApiError;
use crate::resource::{generate_id, Resource};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub all: Option<String>,
}

/// Request bodies are taken as raw JSON and decoded here so that a
/// malformed body yields the uniform 400 envelope instead of the
/// transport's default rejection.
fn decode<T: serde::de::DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    serde_json::from_value(value).map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))
}

// GET /{collection}?all=<bool>
pub async fn list<R: Resource>(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Value> {
    let records = state.store.load::<R::Record>(R::KEY).await;
    let show_all = query.all.as_deref() == Some("true");

    let visible: Vec<R::Record> = records
        .into_iter()
        .filter(|r| R::visible(r, show_all))
        .collect();

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert("count".to_string(), json!(visible.len()));
    body.insert(
        R::KEY.to_string(),
        serde_json::to_value(&visible).unwrap_or_else(|_| Value::Array(Vec::new())),
    );
    Json(Value::Object(body))
}

// POST /{collection}
pub async fn create<R: Resource>(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload: R::Payload = decode(body)?;
    R::validate(&payload).map_err(ApiError::Validation)?;

    let _guard = state.store.lock(R::KEY).await;
    let mut records = state.store.load::<R::Record>(R::KEY).await;

    if let Some(message) = R::conflict(&records, &payload) {
        return Err(ApiError::Conflict(message));
    }

    let now = Utc::now();
    let record = R::build(payload, generate_id(R::ID_PREFIX, now), now);
    records.push(record.clone());

    if !state.store.save(R::KEY, &records).await {
        return Err(ApiError::Persistence(format!("failed to save {}", R::KEY)));
    }

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(
        "message".to_string(),
        json!(format!("{} created", R::ID_PREFIX)),
    );
    body.insert(
        R::ID_PREFIX.to_string(),
        serde_json::to_value(&record).unwrap_or(Value::Null),
    );
    Ok((StatusCode::CREATED, Json(Value::Object(body))))
}

#[derive(Deserialize)]
pub struct DeletePayload {
    pub id: Option<String>,
    #[serde(rename = "deleteAll", default)]
    pub delete_all: bool,
}

// DELETE /{collection}
pub async fn delete<R: Resource>(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload: DeletePayload = decode(body)?;

    let _guard = state.store.lock(R::KEY).await;

    if payload.delete_all {
        if !state.store.save::<R::Record>(R::KEY, &[]).await {
            return Err(ApiError::Persistence(format!("failed to save {}", R::KEY)));
        }
        return Ok(Json(json!({
            "success": true,
            "message": format!("all {} deleted", R::KEY),
        })));
    }

    let id = payload
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("missing {} id", R::ID_PREFIX)))?;

    let mut records = state.store.load::<R::Record>(R::KEY).await;
    let idx = records
        .iter()
        .position(|r| R::id(r) == id)
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", R::ID_PREFIX)))?;

    let message = R::delete_at(&mut records, idx, Utc::now());

    if !state.store.save(R::KEY, &records).await {
        return Err(ApiError::Persistence(format!("failed to save {}", R::KEY)));
    }

    Ok(Json(json!({ "success": true, "message": message })))
}

/// Bare OPTIONS (the CORS layer already answers preflights).
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
