//! Liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// Reports that the process is serving requests.
#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
