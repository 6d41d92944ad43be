//! Schema augmentation - derives and registers history tables

mod registry;
mod schema;

pub use registry::{HistoryHandle, HistoryRegistry, HistoryRegistryBuilder};
pub use schema::{
    HistorySchema, ACTOR_MAX_LENGTH, HISTORY_COLUMNS, HISTORY_NAME_SUFFIX, HISTORY_TABLE_SUFFIX,
};
