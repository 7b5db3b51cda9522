//! Route definitions for the transaction ledger.

use axum::routing::get;
use axum::Router;

use crate::handlers::transactions;
use crate::state::AppState;

/// Transaction routes mounted at `/transactions`.
///
/// ```text
/// GET /   -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(transactions::list))
}
