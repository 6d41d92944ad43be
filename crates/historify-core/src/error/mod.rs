//! Domain error types

mod history_error;

pub use history_error::HistoryError;
