//! Bounty and participant entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starklytics_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `bounties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bounty {
    pub id: DbId,
    pub creator_id: DbId,
    pub title: String,
    pub description: String,
    pub amount: f64,
    pub token: String,
    pub deadline: Timestamp,
    pub difficulty: String,
    pub current_participants: i32,
    pub max_participants: i32,
    pub rpc_endpoint: String,
    pub metadata: serde_json::Value,
    pub winner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `bounty_participants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BountyParticipant {
    pub id: DbId,
    pub bounty_id: DbId,
    pub participant_id: DbId,
    pub status: String,
    pub submission_url: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for posting a new bounty.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBounty {
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub token: Option<String>,
    pub deadline: Timestamp,
    pub difficulty: Option<String>,
    pub max_participants: Option<i32>,
    pub rpc_endpoint: String,
    pub metadata: Option<serde_json::Value>,
}
