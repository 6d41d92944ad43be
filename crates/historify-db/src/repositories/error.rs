//! Error handling utilities for repositories

use historify_core::HistoryError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to HistoryError
pub fn map_db_error(e: SqlxError) -> HistoryError {
    HistoryError::DatabaseError(e.to_string())
}
