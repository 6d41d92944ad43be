//! PostgreSQL implementation of HistoryHooks
//!
//! Audit rows are written through the connection handed in by the host, so
//! they commit or roll back together with the change they describe.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::{debug, instrument};

use historify_core::{
    ActorResolver, Historified, HistoryHooks, HistoryRegistry, HistorySchema, RepoResult, Tracked,
};

use crate::mappers::HistoryInsert;
use crate::repositories::map_db_error;

/// Writes history rows for registered base entities
#[derive(Debug, Clone)]
pub struct PgChangeRecorder {
    registry: Arc<HistoryRegistry>,
    actors: ActorResolver,
}

impl PgChangeRecorder {
    /// Create a new recorder over a frozen registry
    pub fn new(registry: Arc<HistoryRegistry>, actors: ActorResolver) -> Self {
        Self { registry, actors }
    }

    pub fn registry(&self) -> &HistoryRegistry {
        &self.registry
    }

    async fn insert_row(
        conn: &mut PgConnection,
        schema: &HistorySchema,
        row: HistoryInsert,
    ) -> RepoResult<i64> {
        let sql = format!(
            r#"
            INSERT INTO "{}" (model_id, "timestamp", actor, changed_fields)
            VALUES ($1, $2, $3, $4)
            RETURNING history_id
            "#,
            schema.history_table
        );

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(row.model_id)
            .bind(row.timestamp)
            .bind(&row.actor)
            .bind(&row.changed_fields)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl HistoryHooks for PgChangeRecorder {
    type Conn = PgConnection;

    #[instrument(skip(self, conn, target), fields(entity = T::ENTITY_NAME, model_id = ?target.id()))]
    async fn before_update<T>(
        &self,
        conn: &mut PgConnection,
        target: &Tracked<T>,
    ) -> RepoResult<Option<i64>>
    where
        T: Historified,
    {
        let schema = self.registry.require::<T>()?;
        let changes = target.changes();

        if changes.is_empty() {
            debug!("No changed fields, skipping history");
            return Ok(None);
        }
        let Some(model_id) = target.id() else {
            debug!("Entity has no identifier, skipping history");
            return Ok(None);
        };

        let fields = changes.len();
        let row = HistoryInsert::updated(model_id, self.actors.resolve(), changes)?;
        let history_id = Self::insert_row(conn, schema, row).await?;

        debug!(history_id, fields, "Recorded update history");
        Ok(Some(history_id))
    }

    #[instrument(skip(self, conn, target), fields(entity = T::ENTITY_NAME, model_id = ?target.id()))]
    async fn after_insert<T>(&self, conn: &mut PgConnection, target: &T) -> RepoResult<Option<i64>>
    where
        T: Historified,
    {
        let Some(model_id) = target.id() else {
            debug!("Entity has no identifier, skipping history");
            return Ok(None);
        };
        let schema = self.registry.require::<T>()?;

        let row = HistoryInsert::created(model_id, self.actors.resolve());
        let history_id = Self::insert_row(conn, schema, row).await?;

        debug!(history_id, "Recorded insert history");
        Ok(Some(history_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use historify_core::{Caller, FixedIdentity};

    #[test]
    fn test_recorder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChangeRecorder>();
    }

    #[test]
    fn test_recorder_exposes_registry() {
        let recorder = PgChangeRecorder::new(
            Arc::new(HistoryRegistry::default()),
            ActorResolver::new(Arc::new(FixedIdentity(Caller::Anonymous))),
        );
        assert!(recorder.registry().is_empty());
    }
}
