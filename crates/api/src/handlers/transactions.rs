//! Handlers for the `/transactions` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use starklytics_db::repositories::TransactionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/transactions
///
/// List the caller's transactions, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let transactions = TransactionRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: transactions }))
}
