/// Repository trait for follow edges
///
/// Implementations check the request context before touching storage and
/// report storage failures as Internal-class or Unavailable errors. Empty
/// listings are successes.
use crate::modules::subscription::domain::entities::FollowEdge;
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait EdgeStore: Send + Sync {
    /// Insert an edge. A duplicate pair fails with `AlreadyExists`, enforced by
    /// the storage layer itself rather than a prior lookup.
    ///
    /// The context is checked before the write starts. A write that has started
    /// runs to completion even if the caller cancels meanwhile, and its result
    /// reflects the committed state.
    async fn create(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<FollowEdge>;

    /// Remove an edge. Fails with `NotFound` when no row was removed.
    /// Cancellation behaves as for `create`.
    async fn delete(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<()>;

    /// Ids followed by `user_id`, oldest edge first
    async fn list_followed(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<Vec<UserId>>;

    /// Ids following `user_id`, oldest edge first
    async fn list_followers(&self, ctx: &RequestContext, user_id: UserId)
        -> AppResult<Vec<UserId>>;

    async fn exists(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<bool>;
}
