//! Handlers for the `/queries` resource.
//!
//! Saved queries are authored in the editor, shared via `is_public`, and
//! "executed" by the mock engine in [`crate::engine`]. Each run inserts a
//! cached result row and publishes `query.result_inserted` so WebSocket
//! subscribers see new data without polling.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use starklytics_core::error::CoreError;
use starklytics_core::types::DbId;
use starklytics_core::visualization::{column_options, ResultRow};
use starklytics_db::models::query::{CreateQuery, SavedQuery, UpdateQuery};
use starklytics_db::repositories::{QueryRepo, QueryResultRepo};
use starklytics_events::{event_types, PlatformEvent};

use crate::engine;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /queries/{id}/favorite`.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub favorite: bool,
}

/// Response body for `GET /queries/{id}/columns`.
///
/// `x_options` lists every column in the first row of the latest cached
/// result; `y_options` the numeric-coercible subset. Both are empty when no
/// result is cached, which disables axis selection in the editor.
#[derive(Debug, Serialize)]
pub struct ColumnOptions {
    pub x_options: Vec<String>,
    pub y_options: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a query and check the caller owns it.
async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<SavedQuery> {
    let query = QueryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id,
        }))?;

    if query.creator_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the query's creator may modify it".into(),
        )));
    }
    Ok(query)
}

/// Decode a cached `results` JSON array into result rows.
///
/// Non-object elements are skipped; the aggregation layer only understands
/// column/value records.
fn decode_rows(results: &serde_json::Value) -> Vec<ResultRow> {
    results
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/queries
///
/// List queries visible to the caller: their own plus public ones.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let queries = QueryRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: queries }))
}

/// POST /api/v1/queries
///
/// Save a new query owned by the caller.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuery>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Query title must not be empty".into(),
        )));
    }

    let query = QueryRepo::create(&state.pool, auth.user_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::QUERY_CREATED)
            .with_source("query", query.id)
            .with_actor(auth.user_id),
    );

    tracing::info!(query_id = query.id, user_id = auth.user_id, "Query saved");

    Ok((StatusCode::CREATED, Json(DataResponse { data: query })))
}

/// PUT /api/v1/queries/{id}
///
/// Partially update a query. Only the creator may update.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(query_id): Path<DbId>,
    Json(input): Json<UpdateQuery>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, query_id, auth.user_id).await?;

    let updated = QueryRepo::update(&state.pool, query_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id: query_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/queries/{id}
///
/// Delete a query and its cached results. Only the creator may delete.
/// Widgets still referencing the id degrade to "no data" -- the reference
/// is weak by design.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(query_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, query_id, auth.user_id).await?;

    QueryRepo::delete(&state.pool, query_id).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::QUERY_DELETED)
            .with_source("query", query_id)
            .with_actor(auth.user_id),
    );

    tracing::info!(query_id, user_id = auth.user_id, "Query deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/queries/{id}/favorite
///
/// Set or clear the favorite flag.
pub async fn set_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(query_id): Path<DbId>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, query_id, auth.user_id).await?;

    let updated = QueryRepo::set_favorite(&state.pool, query_id, input.favorite)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id: query_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Execution and results
// ---------------------------------------------------------------------------

/// POST /api/v1/queries/{id}/run
///
/// Execute a query through the mock engine: inserts one canned result row,
/// stamps `last_run_at`, and publishes `query.result_inserted` for live
/// subscribers. Real execution does not exist yet.
pub async fn run(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(query_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let query = QueryRepo::find_by_id(&state.pool, query_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id: query_id,
        }))?;

    let results = engine::run_mock(&query.query_text);
    let row_count = engine::mock_row_count(&results);

    let result = QueryResultRepo::insert(
        &state.pool,
        query_id,
        &results,
        Some(engine::MOCK_EXECUTION_TIME),
        Some(row_count),
    )
    .await?;
    QueryRepo::touch_last_run(&state.pool, query_id).await?;

    let payload = serde_json::to_value(&result)
        .map_err(|e| AppError::InternalError(format!("Result serialization error: {e}")))?;
    state.event_bus.publish(
        PlatformEvent::new(event_types::QUERY_RESULT_INSERTED)
            .with_source("query", query_id)
            .with_actor(auth.user_id)
            .with_payload(payload),
    );

    tracing::info!(query_id, result_id = result.id, row_count, "Query executed (mock)");

    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}

/// GET /api/v1/queries/{id}/results
///
/// The latest cached result for a query, or `null` if it has never run.
pub async fn latest_result(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(query_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let result = QueryResultRepo::latest_for_query(&state.pool, query_id).await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/queries/{id}/columns
///
/// Axis options derived from the latest cached result. Derived, never
/// stored: deleting the query or its results empties both lists.
pub async fn columns(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(query_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rows = match QueryResultRepo::latest_for_query(&state.pool, query_id).await? {
        Some(result) => decode_rows(&result.results),
        None => Vec::new(),
    };

    let (x_options, y_options) = column_options(&rows);

    Ok(Json(DataResponse {
        data: ColumnOptions {
            x_options,
            y_options,
        },
    }))
}
