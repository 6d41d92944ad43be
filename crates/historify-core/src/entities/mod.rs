//! Domain entities - history records and their payloads

mod history;

pub use history::{ChangeSet, ChangedFields, FieldChange, HistoryEntry, CREATED_MARKER};
