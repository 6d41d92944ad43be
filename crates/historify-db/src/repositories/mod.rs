//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in historify-core.

mod error;
mod history;

pub use error::map_db_error;
pub use history::PgHistoryRepository;
