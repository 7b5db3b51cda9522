//! User account entity model and DTOs.

use serde::Deserialize;
use sqlx::FromRow;
use starklytics_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is a PHC-formatted Argon2id string and must never be
/// serialized into API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<String>,
}
