//! History row database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a `<table>_histories` row
#[derive(Debug, Clone, FromRow)]
pub struct HistoryModel {
    pub history_id: i64,
    pub model_id: i64,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    /// `created`, or a JSON object of `{from, to}` pairs
    pub changed_fields: String,
}
