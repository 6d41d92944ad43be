//! # historify-db
//!
//! PostgreSQL storage for entity change history via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - History table DDL derived from registered schemas
//! - `PgChangeRecorder`, the `HistoryHooks` implementation that writes audit
//!   rows on the caller's transaction
//! - `PgHistoryRepository` for reading history back
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use historify_core::{HistoryHooks, HistoryRegistry, Tracked};
//! use historify_db::{create_pool_from_env, ensure_history_tables, PgChangeRecorder};
//!
//! async fn example(config: &historify_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut builder = HistoryRegistry::builder();
//!     builder.register::<Widget>()?;
//!     let registry = Arc::new(builder.build());
//!
//!     let pool = create_pool_from_env().await?;
//!     ensure_history_tables(&pool, &registry).await?;
//!
//!     let recorder = PgChangeRecorder::new(registry, historify_common::actor_resolver(config));
//!
//!     let mut widget: Tracked<Widget> = load_widget(&pool, 1).await?;
//!     widget.price = 20;
//!
//!     let mut tx = pool.begin().await?;
//!     recorder.before_update(&mut *tx, &widget).await?;
//!     update_widget(&mut *tx, &widget).await?;
//!     tx.commit().await?;
//!     widget.mark_persisted();
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod recorder;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgConnection, PgPool};
pub use recorder::PgChangeRecorder;
pub use repositories::PgHistoryRepository;
pub use schema::{ensure_history_table, ensure_history_tables};
