//! Traits at the seams between the domain and its hosts

mod historified;
mod hooks;
mod identity;
mod repositories;

pub use historified::Historified;
pub use hooks::HistoryHooks;
pub use identity::{Caller, FixedIdentity, IdentityError, IdentityProvider};
pub use repositories::{HistoryRepository, RepoResult};
