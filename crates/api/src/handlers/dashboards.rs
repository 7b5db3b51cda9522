//! Handlers for the `/dashboards` resource.
//!
//! A dashboard is persisted as one row holding the whole serialized
//! aggregate (widgets + per-breakpoint layouts). Saves are all-or-nothing
//! upserts keyed by `(user_id, name)` with no version check: the last save
//! to land wins.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use starklytics_core::dashboard::{DashboardState, Layout, Widget};
use starklytics_core::error::CoreError;
use starklytics_core::export::{export_filename, ExportDocument};
use starklytics_core::types::DbId;
use starklytics_db::models::dashboard::{Dashboard, SaveDashboard};
use starklytics_db::repositories::DashboardRepo;
use starklytics_events::{event_types, PlatformEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /dashboards`.
///
/// Layouts and widgets arrive as the typed core aggregates so malformed
/// payloads are rejected at the boundary rather than stored.
#[derive(Debug, Deserialize)]
pub struct SaveDashboardRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub layouts: Layout,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a dashboard and check the caller owns it.
async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Dashboard> {
    let dashboard = DashboardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id,
        }))?;

    if dashboard.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Dashboards are private to their owner".into(),
        )));
    }
    Ok(dashboard)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboards
///
/// List the caller's saved dashboards, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let dashboards = DashboardRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: dashboards }))
}

/// POST /api/v1/dashboards
///
/// Save the caller's dashboard. Validates before any store call; the upsert
/// writes the whole aggregate or nothing.
pub async fn save(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveDashboardRequest>,
) -> AppResult<impl IntoResponse> {
    let dashboard_state = DashboardState {
        name: input.name,
        description: input.description,
        widgets: input.widgets,
        layouts: input.layouts,
    };
    dashboard_state.validate_for_save()?;

    let row = SaveDashboard {
        name: dashboard_state.name.clone(),
        description: dashboard_state.description.clone(),
        layouts_json: serde_json::to_value(&dashboard_state.layouts)
            .map_err(|e| AppError::InternalError(format!("Layout serialization error: {e}")))?,
        widgets_json: serde_json::to_value(&dashboard_state.widgets)
            .map_err(|e| AppError::InternalError(format!("Widget serialization error: {e}")))?,
        rpc_endpoint: state.config.rpc_endpoint.clone(),
    };

    let saved = DashboardRepo::upsert(&state.pool, auth.user_id, &row).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::DASHBOARD_SAVED)
            .with_source("dashboard", saved.id)
            .with_actor(auth.user_id),
    );

    tracing::info!(
        dashboard_id = saved.id,
        user_id = auth.user_id,
        name = %saved.name,
        "Dashboard saved",
    );

    Ok(Json(DataResponse { data: saved }))
}

/// GET /api/v1/dashboards/{id}
///
/// Retrieve a single dashboard. Dashboards are private to their owner.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(dashboard_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dashboard = find_owned(&state, dashboard_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: dashboard }))
}

/// DELETE /api/v1/dashboards/{id}
///
/// Delete a dashboard. Its widgets live inside the row and disappear with
/// it; they have no independent lifecycle.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(dashboard_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, dashboard_id, auth.user_id).await?;
    DashboardRepo::delete(&state.pool, dashboard_id).await?;

    tracing::info!(dashboard_id, user_id = auth.user_id, "Dashboard deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/dashboards/{id}/export
///
/// Download the dashboard as a self-contained JSON document. The suggested
/// filename is `"{name|dashboard}_{unix_millis}.json"`.
pub async fn export(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(dashboard_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dashboard = find_owned(&state, dashboard_id, auth.user_id).await?;

    // The stored aggregates were validated at save time; a decode failure
    // here means the row was tampered with out of band.
    let layouts: Layout = serde_json::from_value(dashboard.layouts_json)
        .map_err(|e| AppError::InternalError(format!("Stored layout is corrupt: {e}")))?;
    let widgets: Vec<Widget> = serde_json::from_value(dashboard.widgets_json)
        .map_err(|e| AppError::InternalError(format!("Stored widgets are corrupt: {e}")))?;

    let dashboard_state = DashboardState {
        name: dashboard.name,
        description: dashboard.description,
        widgets,
        layouts,
    };

    let document = ExportDocument::from_state(&dashboard_state, &dashboard.rpc_endpoint);
    let body = serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::InternalError(format!("Export serialization error: {e}")))?;

    let filename = export_filename(&dashboard_state.name, Utc::now().timestamp_millis());

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}
