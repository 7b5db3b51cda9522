//! Repository for the `profiles` table.

use sqlx::PgPool;
use starklytics_core::types::DbId;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for `profiles` queries.
const COLUMNS: &str = "\
    id, user_id, full_name, avatar_url, bio, wallet_address, \
    total_earnings, reputation_score, created_at, updated_at";

/// Provides data access for per-user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a user's profile. Returns `None` if none exists yet.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a user's profile. Creates if absent, merges provided fields
    /// if it exists (one row per user via `ON CONFLICT (user_id)`).
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        dto: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, full_name, avatar_url, bio, wallet_address) \
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, '')) \
             ON CONFLICT (user_id) DO UPDATE \
             SET full_name      = COALESCE($2, profiles.full_name), \
                 avatar_url     = COALESCE($3, profiles.avatar_url), \
                 bio            = COALESCE($4, profiles.bio), \
                 wallet_address = COALESCE($5, profiles.wallet_address) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&dto.full_name)
            .bind(&dto.avatar_url)
            .bind(&dto.bio)
            .bind(&dto.wallet_address)
            .fetch_one(pool)
            .await
    }

    /// Add to a user's running total of bounty earnings.
    pub async fn add_earnings(
        pool: &PgPool,
        user_id: DbId,
        amount: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE profiles SET total_earnings = total_earnings + $2 WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(amount)
        .execute(pool)
        .await?;
        Ok(())
    }
}
