//! DDL for history tables
//!
//! Names come from a validated `HistorySchema`, so they are safe to splice
//! into statements. The base table must exist before its history table.

use sqlx::PgPool;
use tracing::{info, instrument};

use historify_core::registry::ACTOR_MAX_LENGTH;
use historify_core::{HistoryRegistry, HistorySchema, RepoResult};

use crate::repositories::map_db_error;

/// `CREATE TABLE` statement for the history table of `schema`
pub fn create_table_sql(schema: &HistorySchema) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS "{history}" (
    history_id BIGSERIAL PRIMARY KEY,
    model_id BIGINT NOT NULL REFERENCES "{base}" ("{id}") ON DELETE CASCADE,
    "timestamp" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    actor VARCHAR({actor_len}) NOT NULL,
    changed_fields TEXT NOT NULL DEFAULT ''
)"#,
        history = schema.history_table,
        base = schema.entity_table,
        id = schema.entity_id_column,
        actor_len = ACTOR_MAX_LENGTH,
    )
}

/// `CREATE INDEX` statement for the `model_id` lookup index
pub fn create_index_sql(schema: &HistorySchema) -> String {
    format!(
        r#"CREATE INDEX IF NOT EXISTS "{index}" ON "{history}" (model_id)"#,
        index = schema.model_index_name(),
        history = schema.history_table,
    )
}

/// Create the history table and its index if they do not exist
#[instrument(skip(pool, schema), fields(history_table = %schema.history_table))]
pub async fn ensure_history_table(pool: &PgPool, schema: &HistorySchema) -> RepoResult<()> {
    let mut tx = pool.begin().await.map_err(map_db_error)?;

    sqlx::query(&create_table_sql(schema))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

    sqlx::query(&create_index_sql(schema))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

    tx.commit().await.map_err(map_db_error)?;

    info!("History table ready");
    Ok(())
}

/// Create every registered history table, returning how many were processed
pub async fn ensure_history_tables(pool: &PgPool, registry: &HistoryRegistry) -> RepoResult<usize> {
    let mut count = 0;
    for schema in registry.schemas() {
        ensure_history_table(pool, schema).await?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use historify_core::{FieldValue, Historified};

    struct Widget;

    impl Historified for Widget {
        const ENTITY_NAME: &'static str = "Widget";
        const TABLE_NAME: &'static str = "widgets";
        const ID_COLUMN: &'static str = "widget_id";

        fn id(&self) -> Option<i64> {
            None
        }

        fn columns(&self) -> Vec<(&'static str, FieldValue)> {
            Vec::new()
        }
    }

    #[test]
    fn test_create_table_sql() {
        let schema = HistorySchema::of::<Widget>().unwrap();
        let sql = create_table_sql(&schema);

        assert!(sql.starts_with(r#"CREATE TABLE IF NOT EXISTS "widgets_histories""#));
        assert!(sql.contains(r#"REFERENCES "widgets" ("widget_id") ON DELETE CASCADE"#));
        assert!(sql.contains("actor VARCHAR(100) NOT NULL"));
        assert!(sql.contains("history_id BIGSERIAL PRIMARY KEY"));
    }

    #[test]
    fn test_create_index_sql() {
        let schema = HistorySchema::of::<Widget>().unwrap();
        assert_eq!(
            create_index_sql(&schema),
            r#"CREATE INDEX IF NOT EXISTS "ix_widgets_histories_model_id" ON "widgets_histories" (model_id)"#
        );
    }
}
