//! Transaction ledger entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starklytics_core::types::{DbId, Timestamp};

/// A row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub user_id: DbId,
    pub bounty_id: Option<DbId>,
    pub transaction_type: String,
    pub amount: f64,
    pub token: String,
    pub status: String,
    pub wallet_transaction_hash: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransaction {
    pub user_id: DbId,
    pub bounty_id: Option<DbId>,
    pub transaction_type: String,
    pub amount: f64,
    pub token: Option<String>,
    pub wallet_transaction_hash: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
