//! Route definitions for the caller's profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile routes mounted at `/profile`.
///
/// ```text
/// GET /   -> get
/// PUT /   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(profile::get).put(profile::update))
}
