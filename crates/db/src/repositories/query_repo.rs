//! Repository for the `queries` table.

use sqlx::PgPool;
use starklytics_core::types::DbId;

use crate::models::query::{CreateQuery, SavedQuery, UpdateQuery};

/// Column list for `queries` queries.
const COLUMNS: &str = "\
    id, creator_id, title, description, query_text, metadata, \
    is_public, favorite, last_run_at, created_at, updated_at";

/// Provides CRUD operations for saved queries.
pub struct QueryRepo;

impl QueryRepo {
    /// Create a new saved query owned by `creator_id`.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        dto: &CreateQuery,
    ) -> Result<SavedQuery, sqlx::Error> {
        let query = format!(
            "INSERT INTO queries (creator_id, title, query_text, description, metadata, is_public) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, FALSE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedQuery>(&query)
            .bind(creator_id)
            .bind(&dto.title)
            .bind(&dto.query_text)
            .bind(&dto.description)
            .bind(&dto.metadata)
            .bind(dto.is_public)
            .fetch_one(pool)
            .await
    }

    /// List queries visible to a user: their own plus public ones,
    /// most recently updated first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SavedQuery>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM queries \
             WHERE creator_id = $1 OR is_public \
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, SavedQuery>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single query by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SavedQuery>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM queries WHERE id = $1");
        sqlx::query_as::<_, SavedQuery>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a saved query.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateQuery,
    ) -> Result<Option<SavedQuery>, sqlx::Error> {
        let query = format!(
            "UPDATE queries SET \
                 title      = COALESCE($2, title), \
                 query_text = COALESCE($3, query_text), \
                 description = COALESCE($4, description), \
                 metadata   = COALESCE($5, metadata), \
                 is_public  = COALESCE($6, is_public) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedQuery>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.query_text)
            .bind(&dto.description)
            .bind(&dto.metadata)
            .bind(dto.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the favorite flag.
    pub async fn set_favorite(
        pool: &PgPool,
        id: DbId,
        favorite: bool,
    ) -> Result<Option<SavedQuery>, sqlx::Error> {
        let query = format!(
            "UPDATE queries SET favorite = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedQuery>(&query)
            .bind(id)
            .bind(favorite)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_run_at` after an execution.
    pub async fn touch_last_run(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE queries SET last_run_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a query by ID. Cached results cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM queries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
