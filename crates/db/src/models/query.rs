//! Saved query and cached result entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starklytics_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `queries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SavedQuery {
    pub id: DbId,
    pub creator_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub query_text: String,
    /// Free-form metadata; the editor stores a visualization config under
    /// the `visualization` key.
    pub metadata: Option<serde_json::Value>,
    pub is_public: bool,
    pub favorite: bool,
    pub last_run_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `query_results` table.
///
/// `results` holds the raw row array exactly as the execution engine
/// produced it; axis options and aggregation are derived from it at read
/// time, never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QueryResult {
    pub id: DbId,
    pub query_id: DbId,
    pub results: serde_json::Value,
    pub execution_time: Option<String>,
    pub row_count: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a new saved query.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuery {
    pub title: String,
    pub query_text: String,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub is_public: Option<bool>,
}

/// DTO for partially updating a saved query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuery {
    pub title: Option<String>,
    pub query_text: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub is_public: Option<bool>,
}
