//! Route definitions for the bounty board.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bounties;
use crate::state::AppState;

/// Bounty routes mounted at `/bounties`.
///
/// ```text
/// GET  /                   -> list
/// POST /                   -> create
/// GET  /{id}               -> get
/// GET  /{id}/participants  -> participants
/// POST /{id}/join          -> join
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bounties::list).post(bounties::create))
        .route("/{id}", get(bounties::get))
        .route("/{id}/participants", get(bounties::participants))
        .route("/{id}/join", post(bounties::join))
}
