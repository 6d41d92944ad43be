//! Repository traits (ports) - read access to recorded history
//!
//! History rows are append-only, so there is no update or delete here.

use async_trait::async_trait;

use crate::entities::HistoryEntry;
use crate::error::HistoryError;
use crate::registry::HistorySchema;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, HistoryError>;

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// All history rows of one base record, oldest first
    async fn find_for_model(
        &self,
        schema: &HistorySchema,
        model_id: i64,
    ) -> RepoResult<Vec<HistoryEntry>>;

    /// Most recent history row of one base record
    async fn latest_for_model(
        &self,
        schema: &HistorySchema,
        model_id: i64,
    ) -> RepoResult<Option<HistoryEntry>>;

    /// Number of history rows of one base record
    async fn count_for_model(&self, schema: &HistorySchema, model_id: i64) -> RepoResult<i64>;
}
