//! PostgreSQL implementation of HistoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use historify_core::{HistoryEntry, HistoryRepository, HistorySchema, RepoResult};

use crate::models::HistoryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of HistoryRepository
#[derive(Clone)]
pub struct PgHistoryRepository {
    pool: PgPool,
}

impl PgHistoryRepository {
    /// Create a new PgHistoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    #[instrument(skip(self, schema), fields(history_table = %schema.history_table))]
    async fn find_for_model(
        &self,
        schema: &HistorySchema,
        model_id: i64,
    ) -> RepoResult<Vec<HistoryEntry>> {
        let sql = format!(
            r#"
            SELECT history_id, model_id, "timestamp", actor, changed_fields
            FROM "{}"
            WHERE model_id = $1
            ORDER BY "timestamp", history_id
            "#,
            schema.history_table
        );

        let rows = sqlx::query_as::<_, HistoryModel>(&sql)
            .bind(model_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(HistoryEntry::try_from).collect()
    }

    #[instrument(skip(self, schema), fields(history_table = %schema.history_table))]
    async fn latest_for_model(
        &self,
        schema: &HistorySchema,
        model_id: i64,
    ) -> RepoResult<Option<HistoryEntry>> {
        let sql = format!(
            r#"
            SELECT history_id, model_id, "timestamp", actor, changed_fields
            FROM "{}"
            WHERE model_id = $1
            ORDER BY "timestamp" DESC, history_id DESC
            LIMIT 1
            "#,
            schema.history_table
        );

        let row = sqlx::query_as::<_, HistoryModel>(&sql)
            .bind(model_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(HistoryEntry::try_from).transpose()
    }

    #[instrument(skip(self, schema), fields(history_table = %schema.history_table))]
    async fn count_for_model(&self, schema: &HistorySchema, model_id: i64) -> RepoResult<i64> {
        let sql = format!(
            r#"SELECT COUNT(*) FROM "{}" WHERE model_id = $1"#,
            schema.history_table
        );

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(model_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
