//! Repository for the `dashboards` table.

use sqlx::PgPool;
use starklytics_core::types::DbId;

use crate::models::dashboard::{Dashboard, SaveDashboard};

/// Column list for `dashboards` queries.
const COLUMNS: &str = "\
    id, user_id, name, description, layouts_json, widgets_json, \
    rpc_endpoint, created_at, updated_at";

/// Provides data access for saved dashboards.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Save a dashboard, creating or overwriting by `(user_id, name)`.
    ///
    /// Uses `ON CONFLICT ... DO UPDATE` so a save is all-or-nothing and
    /// last-writer-wins: there is no version check, and two racing saves of
    /// the same name leave exactly one of the two payloads.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &SaveDashboard,
    ) -> Result<Dashboard, sqlx::Error> {
        let query = format!(
            "INSERT INTO dashboards (user_id, name, description, layouts_json, widgets_json, rpc_endpoint) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, name) DO UPDATE \
             SET description  = EXCLUDED.description, \
                 layouts_json = EXCLUDED.layouts_json, \
                 widgets_json = EXCLUDED.widgets_json, \
                 rpc_endpoint = EXCLUDED.rpc_endpoint \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.layouts_json)
            .bind(&input.widgets_json)
            .bind(&input.rpc_endpoint)
            .fetch_one(pool)
            .await
    }

    /// List a user's dashboards, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Dashboard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dashboards \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single dashboard by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dashboard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboards WHERE id = $1");
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dashboard by ID.
    ///
    /// Returns `true` if a row was deleted. Widgets have no independent
    /// lifecycle; they live inside the row and disappear with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dashboards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
