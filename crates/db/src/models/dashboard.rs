//! Dashboard entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use starklytics_core::types::{DbId, Timestamp};

/// A row from the `dashboards` table.
///
/// `layouts_json` and `widgets_json` hold the serialized
/// `starklytics_core::dashboard::{Layout, Vec<Widget>}` aggregates; the row
/// is always written whole (all-or-nothing save).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dashboard {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub layouts_json: serde_json::Value,
    pub widgets_json: serde_json::Value,
    pub rpc_endpoint: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for saving a dashboard (create or overwrite by `(user_id, name)`).
#[derive(Debug, Clone, Deserialize)]
pub struct SaveDashboard {
    pub name: String,
    pub description: String,
    pub layouts_json: serde_json::Value,
    pub widgets_json: serde_json::Value,
    pub rpc_endpoint: String,
}
