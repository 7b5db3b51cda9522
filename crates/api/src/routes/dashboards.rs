//! Route definitions for dashboards.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboards;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboards`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> save (upsert by user+name)
/// GET    /{id}          -> get
/// DELETE /{id}          -> delete
/// GET    /{id}/export   -> export (attachment download)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboards::list).post(dashboards::save))
        .route("/{id}", get(dashboards::get).delete(dashboards::delete))
        .route("/{id}/export", get(dashboards::export))
}
