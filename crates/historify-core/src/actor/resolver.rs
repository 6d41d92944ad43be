//! Actor resolution - who is responsible for a change
//!
//! Walks an explicit fallback chain of identity providers. Nothing raised by
//! a provider ever reaches the caller; the sentinel is used instead.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::registry::ACTOR_MAX_LENGTH;
use crate::traits::{Caller, IdentityProvider};

/// Actor recorded when no identity can be resolved
pub const MANUAL_ACTOR: &str = "<<manual>>";

/// Resolves the `actor` column value for a history row
#[derive(Clone)]
pub struct ActorResolver {
    primary: Arc<dyn IdentityProvider>,
    fallback: Option<Arc<dyn IdentityProvider>>,
    sentinel: String,
    max_length: usize,
}

impl ActorResolver {
    /// Create a resolver with a single identity provider
    pub fn new(primary: Arc<dyn IdentityProvider>) -> Self {
        Self {
            primary,
            fallback: None,
            sentinel: MANUAL_ACTOR.to_string(),
            max_length: ACTOR_MAX_LENGTH,
        }
    }

    /// Provider consulted when the primary reports an anonymous caller
    pub fn with_fallback(mut self, fallback: Arc<dyn IdentityProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Cap on the resolved name length, never above the column width
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length.clamp(1, ACTOR_MAX_LENGTH);
        self
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Resolve the caller's display name, if any provider knows it
    pub fn resolve_identity(&self) -> Option<String> {
        let caller = match self.primary.current_caller() {
            Ok(caller) => caller,
            Err(e) => {
                debug!(error = %e, "Primary identity provider failed");
                return None;
            }
        };

        let caller = match (caller, &self.fallback) {
            (Caller::Anonymous, Some(fallback)) => match fallback.current_caller() {
                Ok(caller) => caller,
                Err(e) => {
                    debug!(error = %e, "Fallback identity provider failed");
                    return None;
                }
            },
            (caller, _) => caller,
        };

        match caller {
            Caller::Authenticated { display_name } if !display_name.is_empty() => {
                Some(self.truncate(display_name))
            }
            _ => None,
        }
    }

    /// Resolve the actor, substituting the sentinel when unknown
    pub fn resolve(&self) -> String {
        self.resolve_identity()
            .unwrap_or_else(|| self.truncate(self.sentinel.clone()))
    }

    fn truncate(&self, mut name: String) -> String {
        if let Some((idx, _)) = name.char_indices().nth(self.max_length) {
            name.truncate(idx);
        }
        name
    }
}

impl fmt::Debug for ActorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorResolver")
            .field("has_fallback", &self.fallback.is_some())
            .field("sentinel", &self.sentinel)
            .field("max_length", &self.max_length)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FixedIdentity, IdentityError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing(IdentityError);

    impl IdentityProvider for Failing {
        fn current_caller(&self) -> Result<Caller, IdentityError> {
            Err(self.0.clone())
        }
    }

    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl IdentityProvider for Counting {
        fn current_caller(&self) -> Result<Caller, IdentityError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Caller::authenticated("counted"))
        }
    }

    fn fixed(caller: Caller) -> Arc<dyn IdentityProvider> {
        Arc::new(FixedIdentity(caller))
    }

    #[test]
    fn test_primary_authenticated() {
        let resolver = ActorResolver::new(fixed(Caller::authenticated("alice")))
            .with_fallback(fixed(Caller::authenticated("bob")));
        assert_eq!(resolver.resolve(), "alice");
    }

    #[test]
    fn test_anonymous_primary_uses_fallback() {
        let resolver = ActorResolver::new(fixed(Caller::Anonymous))
            .with_fallback(fixed(Caller::authenticated("bob")));
        assert_eq!(resolver.resolve(), "bob");
    }

    #[test]
    fn test_anonymous_primary_failing_fallback_is_manual() {
        let resolver = ActorResolver::new(fixed(Caller::Anonymous))
            .with_fallback(Arc::new(Failing(IdentityError::MissingCredentials)));
        assert_eq!(resolver.resolve_identity(), None);
        assert_eq!(resolver.resolve(), MANUAL_ACTOR);
    }

    #[test]
    fn test_anonymous_without_fallback_is_manual() {
        let resolver = ActorResolver::new(fixed(Caller::Anonymous));
        assert_eq!(resolver.resolve(), "<<manual>>");
    }

    #[test]
    fn test_primary_failure_skips_fallback() {
        let counting = Arc::new(Counting::default());
        let resolver = ActorResolver::new(Arc::new(Failing(IdentityError::NoRequestContext)))
            .with_fallback(counting.clone());

        assert_eq!(resolver.resolve(), MANUAL_ACTOR);
        assert_eq!(counting.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_display_name_is_manual() {
        let resolver = ActorResolver::new(fixed(Caller::authenticated("")));
        assert_eq!(resolver.resolve(), MANUAL_ACTOR);
    }

    #[test]
    fn test_custom_sentinel() {
        let resolver = ActorResolver::new(fixed(Caller::Anonymous)).with_sentinel("system");
        assert_eq!(resolver.resolve(), "system");
    }

    #[test]
    fn test_truncates_to_column_width() {
        let long = "é".repeat(150);
        let resolver = ActorResolver::new(fixed(Caller::authenticated(long)));
        assert_eq!(resolver.resolve().chars().count(), ACTOR_MAX_LENGTH);

        let resolver = ActorResolver::new(fixed(Caller::authenticated("abcdef")))
            .with_max_length(3);
        assert_eq!(resolver.resolve(), "abc");
    }
}
