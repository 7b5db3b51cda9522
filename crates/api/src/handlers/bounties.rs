//! Handlers for the `/bounties` resource.
//!
//! Creation validates through the core bounty rules before any store call;
//! joining is guarded by the repository transaction so capacity can never
//! be oversubscribed, even under concurrent joins.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use starklytics_core::bounty;
use starklytics_core::error::CoreError;
use starklytics_core::types::DbId;
use starklytics_db::models::bounty::CreateBounty;
use starklytics_db::models::transaction::CreateTransaction;
use starklytics_db::repositories::{BountyRepo, TransactionRepo};
use starklytics_events::{event_types, PlatformEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/bounties
///
/// List all bounties, newest first.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let bounties = BountyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: bounties }))
}

/// GET /api/v1/bounties/{id}
pub async fn get(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(bounty_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let bounty = BountyRepo::find_by_id(&state.pool, bounty_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bounty",
            id: bounty_id,
        }))?;
    Ok(Json(DataResponse { data: bounty }))
}

/// GET /api/v1/bounties/{id}/participants
pub async fn participants(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(bounty_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let participants = BountyRepo::list_participants(&state.pool, bounty_id).await?;
    Ok(Json(DataResponse { data: participants }))
}

/// POST /api/v1/bounties
///
/// Post a new bounty and record the creator's pending deposit.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBounty>,
) -> AppResult<impl IntoResponse> {
    // Domain validation first; nothing is written on failure.
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Bounty title must not be empty".into(),
        )));
    }
    bounty::validate_amount(input.amount).map_err(validation)?;
    bounty::validate_deadline(input.deadline, Utc::now()).map_err(validation)?;
    if let Some(max) = input.max_participants {
        bounty::validate_participant_limit(max).map_err(validation)?;
    }
    if let Some(ref difficulty) = input.difficulty {
        if !bounty::is_valid_difficulty(difficulty) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown difficulty: {difficulty}"
            ))));
        }
    }

    let created = BountyRepo::create(&state.pool, auth.user_id, &input).await?;

    // The stake is recorded as a pending deposit; settlement happens
    // elsewhere once wallets are wired up.
    TransactionRepo::insert(
        &state.pool,
        &CreateTransaction {
            user_id: auth.user_id,
            bounty_id: Some(created.id),
            transaction_type: bounty::transaction_type::DEPOSIT.to_string(),
            amount: created.amount,
            token: Some(created.token.clone()),
            wallet_transaction_hash: None,
            metadata: None,
        },
    )
    .await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::BOUNTY_CREATED)
            .with_source("bounty", created.id)
            .with_actor(auth.user_id),
    );

    tracing::info!(
        bounty_id = created.id,
        user_id = auth.user_id,
        amount = created.amount,
        "Bounty created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/bounties/{id}/join
///
/// Join a bounty as a participant. Refused when the bounty is full, past
/// its deadline, or already joined by the caller.
pub async fn join(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(bounty_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = BountyRepo::find_by_id(&state.pool, bounty_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bounty",
            id: bounty_id,
        }))?;

    let participant = match BountyRepo::join(&state.pool, bounty_id, auth.user_id).await? {
        Some(participant) => participant,
        None => {
            // The guarded update refused the slot; explain why.
            let reason = bounty::can_join(
                existing.current_participants,
                existing.max_participants,
                existing.deadline,
                Utc::now(),
            )
            .err()
            .unwrap_or_else(|| "Bounty is no longer joinable".to_string());
            return Err(AppError::Core(CoreError::Conflict(reason)));
        }
    };

    state.event_bus.publish(
        PlatformEvent::new(event_types::BOUNTY_JOINED)
            .with_source("bounty", bounty_id)
            .with_actor(auth.user_id),
    );

    tracing::info!(bounty_id, user_id = auth.user_id, "Joined bounty");

    Ok((StatusCode::CREATED, Json(DataResponse { data: participant })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validation(msg: String) -> AppError {
    AppError::Core(CoreError::Validation(msg))
}
