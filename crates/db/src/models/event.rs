//! Event log entity models.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `event_types` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventType {
    pub id: i16,
    pub name: String,
    pub category: String,
}
