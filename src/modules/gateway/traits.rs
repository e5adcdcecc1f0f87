use crate::modules::gateway::domain::{MediaRecord, ReviewRecord, UserProfile, WatchlistEntry};
use crate::shared::application::RequestContext;
use crate::shared::domain::{MediaId, UserId};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

// Each gateway wraps a single idempotent lookup on one downstream service.
// Calls are bound to the caller's context and surface only Internal-class or
// Unavailable errors; business classification happens in the service layer.

#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Resolve a user's display data
    async fn get_by_id(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<UserProfile>;
}

#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Resolve catalog metadata for a media title
    async fn get_by_id(&self, ctx: &RequestContext, media_id: MediaId) -> AppResult<MediaRecord>;
}

#[async_trait]
pub trait WatchlistSource: Send + Sync {
    /// All watchlist entries of one user, in the watchlist service's order
    async fn get_by_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<WatchlistEntry>>;
}

#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// All reviews written by one user, in the review service's order
    async fn get_by_user(&self, ctx: &RequestContext, user_id: UserId)
        -> AppResult<Vec<ReviewRecord>>;
}
