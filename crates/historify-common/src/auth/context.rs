//! Request identity scope
//!
//! The web layer runs each request inside a task-local scope carrying what
//! upstream authentication established. Identity providers read it from
//! there. Tasks spawned from a request do not inherit the scope.

use std::future::Future;

tokio::task_local! {
    static REQUEST_IDENTITY: RequestIdentity;
}

/// User established by the host's session layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

impl SessionUser {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Identity material visible to the current request
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    /// Authenticated session user, `None` for anonymous requests
    pub session_user: Option<SessionUser>,
    /// Raw bearer token from the `Authorization` header
    pub bearer_token: Option<String>,
}

impl RequestIdentity {
    /// Identity of an anonymous request with no credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_session_user(mut self, user: SessionUser) -> Self {
        self.session_user = Some(user);
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Run `fut` with `identity` as the ambient request identity
pub async fn with_request_identity<F>(identity: RequestIdentity, fut: F) -> F::Output
where
    F: Future,
{
    REQUEST_IDENTITY.scope(identity, fut).await
}

/// Synchronous variant of [`with_request_identity`]
pub fn sync_with_request_identity<R>(identity: RequestIdentity, f: impl FnOnce() -> R) -> R {
    REQUEST_IDENTITY.sync_scope(identity, f)
}

/// Read the ambient request identity, `None` outside a request scope
pub fn current_request_identity<R>(f: impl FnOnce(&RequestIdentity) -> R) -> Option<R> {
    REQUEST_IDENTITY.try_with(f).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_scope() {
        assert!(current_request_identity(|_| ()).is_none());
    }

    #[tokio::test]
    async fn test_inside_scope() {
        let identity = RequestIdentity::anonymous()
            .with_session_user(SessionUser::new(1, "alice"))
            .with_bearer_token("tok");

        let seen = with_request_identity(identity, async {
            tokio::task::yield_now().await;
            current_request_identity(|ctx| {
                (
                    ctx.session_user.as_ref().map(|u| u.username.clone()),
                    ctx.bearer_token.clone(),
                )
            })
        })
        .await;

        assert_eq!(
            seen,
            Some((Some("alice".to_string()), Some("tok".to_string())))
        );
    }

    #[tokio::test]
    async fn test_spawned_task_does_not_inherit() {
        let inherited = with_request_identity(RequestIdentity::anonymous(), async {
            tokio::spawn(async { current_request_identity(|_| ()).is_some() })
                .await
                .unwrap()
        })
        .await;

        assert!(!inherited);
    }

    #[test]
    fn test_sync_scope() {
        let name = sync_with_request_identity(
            RequestIdentity::anonymous().with_session_user(SessionUser::new(2, "bob")),
            || current_request_identity(|ctx| ctx.session_user.clone()),
        );
        assert_eq!(name.flatten().map(|u| u.username), Some("bob".to_string()));
    }
}
