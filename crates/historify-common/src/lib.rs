//! # historify-common
//!
//! Shared utilities including configuration, error handling, request identity,
//! and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    actor_resolver, with_request_identity, Claims, JwtIdentityProvider, JwtService,
    RequestIdentity, SessionIdentityProvider, SessionUser,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, HistoryConfig, JwtConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
