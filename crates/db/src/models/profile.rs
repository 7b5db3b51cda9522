//! User profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starklytics_core::types::{DbId, Timestamp};

/// A row from the `profiles` table (one per user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub avatar_url: String,
    pub bio: String,
    pub wallet_address: String,
    pub total_earnings: f64,
    pub reputation_score: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for partially updating a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub wallet_address: Option<String>,
}
