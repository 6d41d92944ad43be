//! Lifecycle hook contract invoked by the host persistence layer

use async_trait::async_trait;

use crate::traits::{Historified, RepoResult};
use crate::tracking::Tracked;

/// The two lifecycle callbacks that record history
///
/// The host calls `before_update` before executing an UPDATE and
/// `after_insert` after an INSERT has assigned the identifier, both on the
/// connection of the transaction that carries the change. Each returns the
/// new `history_id`, or `None` when nothing was recorded.
#[async_trait]
pub trait HistoryHooks: Send + Sync {
    /// Connection type the audit row is written through
    type Conn: Send;

    async fn before_update<T>(
        &self,
        conn: &mut Self::Conn,
        target: &Tracked<T>,
    ) -> RepoResult<Option<i64>>
    where
        T: Historified;

    async fn after_insert<T>(&self, conn: &mut Self::Conn, target: &T) -> RepoResult<Option<i64>>
    where
        T: Historified;
}
