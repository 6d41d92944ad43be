//! Identity provider contract - "who is the current caller"

use thiserror::Error;

/// Caller as reported by an identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Authenticated { display_name: String },
    Anonymous,
}

impl Caller {
    pub fn authenticated(display_name: impl Into<String>) -> Self {
        Self::Authenticated {
            display_name: display_name.into(),
        }
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

/// Reasons an identity provider could not answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("No request context is active")]
    NoRequestContext,

    #[error("No credentials were presented")]
    MissingCredentials,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Identity has no display name")]
    MissingDisplayName,
}

/// Source of the current caller's identity
pub trait IdentityProvider: Send + Sync {
    fn current_caller(&self) -> Result<Caller, IdentityError>;
}

/// Provider that always reports the same caller
///
/// Useful for batch jobs and backfills that run outside a request.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub Caller);

impl IdentityProvider for FixedIdentity {
    fn current_caller(&self) -> Result<Caller, IdentityError> {
        Ok(self.0.clone())
    }
}
