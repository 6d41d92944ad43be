//! # historify-core
//!
//! Domain layer for recording per-entity change history: the base entity
//! contract, pending-change tracking, history schemas and their registry,
//! actor resolution, and the hook/repository traits implemented by the
//! storage layer. This crate has no database dependency.

pub mod actor;
pub mod entities;
pub mod error;
pub mod registry;
pub mod tracking;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use actor::{ActorResolver, MANUAL_ACTOR};
pub use entities::{ChangeSet, ChangedFields, FieldChange, HistoryEntry, CREATED_MARKER};
pub use error::HistoryError;
pub use registry::{HistoryHandle, HistoryRegistry, HistoryRegistryBuilder, HistorySchema};
pub use tracking::Tracked;
pub use traits::{
    Caller, FixedIdentity, Historified, HistoryHooks, HistoryRepository, IdentityError,
    IdentityProvider, RepoResult,
};
pub use value_objects::FieldValue;
