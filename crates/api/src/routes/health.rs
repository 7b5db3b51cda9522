//! Health check route.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Root-level health router (not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Liveness probe. Returns 200 with a static body; database reachability is
/// checked at startup, not per request.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
