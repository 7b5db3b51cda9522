//! Handlers for the `/profile` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use starklytics_db::models::profile::UpdateProfile;
use starklytics_db::repositories::ProfileRepo;
use starklytics_events::{event_types, PlatformEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
///
/// Returns the caller's profile, or an empty default if none exists yet.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_user(&state.pool, auth.user_id).await?;

    let data: serde_json::Value = match profile {
        Some(p) => serde_json::to_value(p)
            .map_err(|e| AppError::InternalError(e.to_string()))?,
        None => {
            // Return a default profile instead of 404.
            serde_json::json!({
                "id": 0,
                "user_id": auth.user_id,
                "full_name": "",
                "avatar_url": "",
                "bio": "",
                "wallet_address": "",
                "total_earnings": 0.0,
                "reputation_score": 0,
                "created_at": null,
                "updated_at": null,
            })
        }
    };

    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/profile
///
/// Create or merge the caller's profile.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::upsert(&state.pool, auth.user_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::PROFILE_UPDATED)
            .with_source("profile", profile.id)
            .with_actor(auth.user_id),
    );

    tracing::info!(profile_id = profile.id, user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse { data: profile }))
}
