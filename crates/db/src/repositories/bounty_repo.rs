//! Repository for the `bounties` and `bounty_participants` tables.

use sqlx::PgPool;
use starklytics_core::bounty::{difficulty, participant_status, DEFAULT_MAX_PARTICIPANTS, DEFAULT_TOKEN};
use starklytics_core::types::DbId;

use crate::models::bounty::{Bounty, BountyParticipant, CreateBounty};

/// Column list for `bounties` queries.
const BOUNTY_COLUMNS: &str = "\
    id, creator_id, title, description, amount, token, deadline, difficulty, \
    current_participants, max_participants, rpc_endpoint, metadata, winner_id, \
    created_at, updated_at";

/// Column list for `bounty_participants` queries.
const PARTICIPANT_COLUMNS: &str = "\
    id, bounty_id, participant_id, status, submission_url, metadata, \
    created_at, updated_at";

/// Provides data access for bounties and their participants.
pub struct BountyRepo;

impl BountyRepo {
    /// Post a new bounty.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        dto: &CreateBounty,
    ) -> Result<Bounty, sqlx::Error> {
        let query = format!(
            "INSERT INTO bounties \
                 (creator_id, title, description, amount, token, deadline, \
                  difficulty, max_participants, rpc_endpoint, metadata) \
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, $6), $7, \
                     COALESCE($8, $9), COALESCE($10, $11), $12, \
                     COALESCE($13, '{{}}'::jsonb)) \
             RETURNING {BOUNTY_COLUMNS}"
        );
        sqlx::query_as::<_, Bounty>(&query)
            .bind(creator_id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.amount)
            .bind(&dto.token)
            .bind(DEFAULT_TOKEN)
            .bind(dto.deadline)
            .bind(&dto.difficulty)
            .bind(difficulty::BEGINNER)
            .bind(dto.max_participants)
            .bind(DEFAULT_MAX_PARTICIPANTS)
            .bind(&dto.rpc_endpoint)
            .bind(&dto.metadata)
            .fetch_one(pool)
            .await
    }

    /// List all bounties, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Bounty>, sqlx::Error> {
        let query = format!("SELECT {BOUNTY_COLUMNS} FROM bounties ORDER BY created_at DESC");
        sqlx::query_as::<_, Bounty>(&query).fetch_all(pool).await
    }

    /// Find a single bounty by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bounty>, sqlx::Error> {
        let query = format!("SELECT {BOUNTY_COLUMNS} FROM bounties WHERE id = $1");
        sqlx::query_as::<_, Bounty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Join a bounty as a participant.
    ///
    /// Runs in a transaction: a guarded `UPDATE` claims a participant slot
    /// only while the bounty has free capacity and an open deadline, then
    /// the participant row is inserted. Returns `Ok(None)` when the bounty
    /// does not exist, is full, or is past its deadline. A duplicate join
    /// surfaces as a unique-constraint violation
    /// (`uq_bounty_participants_bounty_participant`).
    pub async fn join(
        pool: &PgPool,
        bounty_id: DbId,
        participant_id: DbId,
    ) -> Result<Option<BountyParticipant>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed: Option<(DbId,)> = sqlx::query_as(
            "UPDATE bounties \
             SET current_participants = current_participants + 1 \
             WHERE id = $1 \
               AND current_participants < max_participants \
               AND deadline > now() \
             RETURNING id",
        )
        .bind(bounty_id)
        .fetch_optional(&mut *tx)
        .await?;

        if claimed.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO bounty_participants (bounty_id, participant_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let participant = sqlx::query_as::<_, BountyParticipant>(&query)
            .bind(bounty_id)
            .bind(participant_id)
            .bind(participant_status::JOINED)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(participant))
    }

    /// List a bounty's participants in join order.
    pub async fn list_participants(
        pool: &PgPool,
        bounty_id: DbId,
    ) -> Result<Vec<BountyParticipant>, sqlx::Error> {
        let query = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM bounty_participants \
             WHERE bounty_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, BountyParticipant>(&query)
            .bind(bounty_id)
            .fetch_all(pool)
            .await
    }
}
