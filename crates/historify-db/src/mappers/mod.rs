//! Entity to model mappers
//!
//! - `TryFrom<HistoryModel> for HistoryEntry`: parse stored rows
//! - `HistoryInsert`: prepare a history row for insertion

mod history;

pub use history::HistoryInsert;
