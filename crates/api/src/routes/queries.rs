//! Route definitions for saved queries.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::queries;
use crate::state::AppState;

/// Query routes mounted at `/queries`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/favorite  -> set_favorite
/// POST   /{id}/run       -> run (mock engine)
/// GET    /{id}/results   -> latest_result
/// GET    /{id}/columns   -> columns
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(queries::list).post(queries::create))
        .route(
            "/{id}",
            axum::routing::put(queries::update).delete(queries::delete),
        )
        .route("/{id}/favorite", post(queries::set_favorite))
        .route("/{id}/run", post(queries::run))
        .route("/{id}/results", get(queries::latest_result))
        .route("/{id}/columns", get(queries::columns))
}
