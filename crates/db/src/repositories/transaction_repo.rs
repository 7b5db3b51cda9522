//! Repository for the `transactions` table.

use sqlx::PgPool;
use starklytics_core::bounty::DEFAULT_TOKEN;
use starklytics_core::types::DbId;

use crate::models::transaction::{CreateTransaction, Transaction};

/// Column list for `transactions` queries.
const COLUMNS: &str = "\
    id, user_id, bounty_id, transaction_type, amount, token, status, \
    wallet_transaction_hash, metadata, created_at, updated_at";

/// Provides data access for the transaction ledger.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a new transaction.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions \
                 (user_id, bounty_id, transaction_type, amount, token, \
                  wallet_transaction_hash, metadata) \
             VALUES ($1, $2, $3, $4, COALESCE($5, $6), $7, \
                     COALESCE($8, '{{}}'::jsonb)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(dto.user_id)
            .bind(dto.bounty_id)
            .bind(&dto.transaction_type)
            .bind(dto.amount)
            .bind(&dto.token)
            .bind(DEFAULT_TOKEN)
            .bind(&dto.wallet_transaction_hash)
            .bind(&dto.metadata)
            .fetch_one(pool)
            .await
    }

    /// List a user's transactions, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a transaction with a new status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!(
            "UPDATE transactions SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
