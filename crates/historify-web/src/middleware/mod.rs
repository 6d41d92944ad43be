//! Middleware for the host's router

mod identity;

pub use identity::{identity_scope, request_identity};
