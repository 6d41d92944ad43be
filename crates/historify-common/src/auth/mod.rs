//! Identity for history actors
//!
//! Provides the request identity scope, the session and JWT identity
//! providers, and the JWT service the fallback provider decodes tokens with.

mod context;
mod jwt;
mod providers;

pub use context::{
    current_request_identity, sync_with_request_identity, with_request_identity,
    RequestIdentity, SessionUser,
};
pub use jwt::{Claims, JwtService, DEFAULT_TOKEN_EXPIRY};
pub use providers::{actor_resolver, JwtIdentityProvider, SessionIdentityProvider};
