//! Request identity middleware
//!
//! Captures what upstream authentication established and runs the rest of the
//! request inside the request identity scope. Nothing is validated here: a
//! bad bearer token simply fails to resolve later and the sentinel is used.

use axum::{extract::Request, http::request::Parts, middleware::Next, response::Response};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use historify_common::{with_request_identity, RequestIdentity, SessionUser};
use tracing::trace;

/// Extract the identity material of a request
pub fn request_identity(parts: &Parts) -> RequestIdentity {
    let session_user = parts.extensions.get::<SessionUser>().cloned();
    let bearer_token = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string());

    RequestIdentity {
        session_user,
        bearer_token,
    }
}

/// Run the request inside its identity scope
///
/// Use with `axum::middleware::from_fn`. Must sit inside any layer that
/// inserts `SessionUser` into the request extensions.
pub async fn identity_scope(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let identity = request_identity(&parts);

    trace!(
        has_session_user = identity.session_user.is_some(),
        has_bearer_token = identity.bearer_token.is_some(),
        "Entering request identity scope"
    );

    let request = Request::from_parts(parts, body);
    with_request_identity(identity, next.run(request)).await
}
