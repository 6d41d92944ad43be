//! Database models - SQLx-compatible structs for PostgreSQL tables

mod history;

pub use history::HistoryModel;
