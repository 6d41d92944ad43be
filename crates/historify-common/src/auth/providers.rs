//! Identity providers backed by the request identity scope

use std::sync::Arc;

use historify_core::{ActorResolver, Caller, IdentityError, IdentityProvider};
use tracing::warn;

use super::context::current_request_identity;
use super::jwt::JwtService;
use crate::config::AppConfig;

/// Primary provider: the session user of the current request
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionIdentityProvider;

impl IdentityProvider for SessionIdentityProvider {
    fn current_caller(&self) -> Result<Caller, IdentityError> {
        let user = current_request_identity(|ctx| ctx.session_user.clone())
            .ok_or(IdentityError::NoRequestContext)?;

        match user {
            Some(user) if user.username.is_empty() => Err(IdentityError::MissingDisplayName),
            Some(user) => Ok(Caller::authenticated(user.username)),
            None => Ok(Caller::Anonymous),
        }
    }
}

/// Fallback provider: the `username` claim of the request's bearer token
#[derive(Debug, Clone)]
pub struct JwtIdentityProvider {
    jwt: JwtService,
}

impl JwtIdentityProvider {
    pub fn new(jwt: JwtService) -> Self {
        Self { jwt }
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn current_caller(&self) -> Result<Caller, IdentityError> {
        let token = current_request_identity(|ctx| ctx.bearer_token.clone())
            .ok_or(IdentityError::NoRequestContext)?
            .ok_or(IdentityError::MissingCredentials)?;

        let claims = self
            .jwt
            .decode_token(&token)
            .map_err(|e| IdentityError::InvalidCredentials(e.to_string()))?;

        claims
            .display_name()
            .map(Caller::authenticated)
            .ok_or(IdentityError::MissingDisplayName)
    }
}

/// Build the actor resolver described by the configuration
///
/// The JWT fallback is only wired when it is enabled and a secret is set.
pub fn actor_resolver(config: &AppConfig) -> ActorResolver {
    let resolver = ActorResolver::new(Arc::new(SessionIdentityProvider))
        .with_sentinel(config.history.sentinel_actor.clone())
        .with_max_length(config.history.actor_max_length);

    match (&config.jwt, config.history.jwt_fallback) {
        (Some(jwt), true) => resolver.with_fallback(Arc::new(JwtIdentityProvider::new(
            JwtService::from_secret(&jwt.secret),
        ))),
        (None, true) => {
            warn!("JWT fallback enabled but JWT_SECRET is not set; using session identity only");
            resolver
        }
        (_, false) => resolver,
    }
}
