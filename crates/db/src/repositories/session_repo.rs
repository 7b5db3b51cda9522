//! Repository for the `sessions` table.

use sqlx::PgPool;
use starklytics_core::types::DbId;

use crate::models::session::{CreateSession, Session};

/// Column list for `sessions` queries.
const COLUMNS: &str = "\
    id, user_id, refresh_token_hash, expires_at, revoked_at, \
    created_at, updated_at";

/// Provides data access for refresh-token sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Create a new session.
    pub async fn create(pool: &PgPool, dto: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(dto.user_id)
            .bind(&dto.refresh_token_hash)
            .bind(dto.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active (unrevoked, unexpired) session by refresh-token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions \
             WHERE refresh_token_hash = $1 \
               AND revoked_at IS NULL \
               AND expires_at > now()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET revoked_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke every session belonging to a user.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET revoked_at = now() WHERE user_id = $1 AND revoked_at IS NULL")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
