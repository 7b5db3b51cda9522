//! Repository for the `query_results` table.

use sqlx::PgPool;
use starklytics_core::types::DbId;

use crate::models::query::QueryResult;

/// Column list for `query_results` queries.
const COLUMNS: &str =
    "id, query_id, results, execution_time, row_count, created_at, updated_at";

/// Provides data access for cached query results.
pub struct QueryResultRepo;

impl QueryResultRepo {
    /// Insert a new result set for a query.
    pub async fn insert(
        pool: &PgPool,
        query_id: DbId,
        results: &serde_json::Value,
        execution_time: Option<&str>,
        row_count: Option<i32>,
    ) -> Result<QueryResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO query_results (query_id, results, execution_time, row_count) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QueryResult>(&query)
            .bind(query_id)
            .bind(results)
            .bind(execution_time)
            .bind(row_count)
            .fetch_one(pool)
            .await
    }

    /// The most recent cached result for a query, if any.
    pub async fn latest_for_query(
        pool: &PgPool,
        query_id: DbId,
    ) -> Result<Option<QueryResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM query_results \
             WHERE query_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, QueryResult>(&query)
            .bind(query_id)
            .fetch_optional(pool)
            .await
    }

    /// All cached results for a query, newest first.
    pub async fn list_for_query(
        pool: &PgPool,
        query_id: DbId,
    ) -> Result<Vec<QueryResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM query_results \
             WHERE query_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, QueryResult>(&query)
            .bind(query_id)
            .fetch_all(pool)
            .await
    }
}
