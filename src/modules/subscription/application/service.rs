use crate::modules::subscription::domain::{
    entities::{FollowEdge, ReviewAggregateItem, WatchlistAggregateItem},
    repositories::EdgeStore,
    services::AggregationEngine,
};
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult, ErrorKind};
use crate::{log_error, log_info, log_warn};
use std::sync::Arc;

/// Public operation surface of the follow graph
///
/// Stateless across requests: validate, check the existence rule, delegate to
/// the edge store or the aggregation engine, then classify the result.
pub struct SubscriptionService {
    edge_store: Arc<dyn EdgeStore>,
    aggregation: Arc<AggregationEngine>,
}

impl SubscriptionService {
    pub fn new(edge_store: Arc<dyn EdgeStore>, aggregation: Arc<AggregationEngine>) -> Self {
        Self {
            edge_store,
            aggregation,
        }
    }

    pub async fn subscribe(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        subscribe_to_id: UserId,
    ) -> AppResult<()> {
        ctx.ensure_active("Subscribe")?;

        if FollowEdge::new(subscriber_id, subscribe_to_id).is_self_follow() {
            log_warn!("User {} attempted to subscribe to themselves", subscriber_id);
            return Err(AppError::InvalidArgument(
                "user cannot subscribe to themselves".to_string(),
            ));
        }

        let exists = self
            .edge_store
            .exists(ctx, subscriber_id, subscribe_to_id)
            .await
            .map_err(|e| classify("check subscription", e))?;
        if exists {
            log_warn!(
                "User {} is already subscribed to user {}",
                subscriber_id,
                subscribe_to_id
            );
            return Err(already_subscribed(subscriber_id, subscribe_to_id));
        }

        match self
            .edge_store
            .create(ctx, subscriber_id, subscribe_to_id)
            .await
        {
            Ok(_) => {
                log_info!(
                    "User {} subscribed to user {}",
                    subscriber_id,
                    subscribe_to_id
                );
                Ok(())
            }
            // A concurrent subscribe won the insert after our existence check
            Err(AppError::AlreadyExists(_)) => {
                log_warn!(
                    "User {} is already subscribed to user {}",
                    subscriber_id,
                    subscribe_to_id
                );
                Err(already_subscribed(subscriber_id, subscribe_to_id))
            }
            Err(e) => Err(classify("create subscription", e)),
        }
    }

    pub async fn unsubscribe(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        unsubscribe_from_id: UserId,
    ) -> AppResult<()> {
        ctx.ensure_active("Unsubscribe")?;

        let exists = self
            .edge_store
            .exists(ctx, subscriber_id, unsubscribe_from_id)
            .await
            .map_err(|e| classify("check subscription", e))?;
        if !exists {
            log_warn!(
                "User {} is not subscribed to user {}",
                subscriber_id,
                unsubscribe_from_id
            );
            return Err(not_subscribed(subscriber_id, unsubscribe_from_id));
        }

        match self
            .edge_store
            .delete(ctx, subscriber_id, unsubscribe_from_id)
            .await
        {
            Ok(()) => {
                log_info!(
                    "User {} unsubscribed from user {}",
                    subscriber_id,
                    unsubscribe_from_id
                );
                Ok(())
            }
            Err(AppError::NotFound(_)) => Err(not_subscribed(subscriber_id, unsubscribe_from_id)),
            Err(e) => Err(classify("delete subscription", e)),
        }
    }

    pub async fn get_subscriptions(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<UserId>> {
        ctx.ensure_active("GetSubscriptions")?;

        let ids = self
            .edge_store
            .list_followed(ctx, user_id)
            .await
            .map_err(|e| classify("get subscriptions", e))?;

        log_info!("Fetched {} subscriptions for user {}", ids.len(), user_id);
        Ok(ids)
    }

    pub async fn get_subscribers(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<UserId>> {
        ctx.ensure_active("GetSubscribers")?;

        let ids = self
            .edge_store
            .list_followers(ctx, user_id)
            .await
            .map_err(|e| classify("get subscribers", e))?;

        log_info!("Fetched {} subscribers for user {}", ids.len(), user_id);
        Ok(ids)
    }

    pub async fn is_subscribed(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        subscribe_to_id: UserId,
    ) -> AppResult<bool> {
        ctx.ensure_active("IsSubscribed")?;

        self.edge_store
            .exists(ctx, subscriber_id, subscribe_to_id)
            .await
            .map_err(|e| classify("check subscription", e))
    }

    pub async fn get_watchlists_by_subscription(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<WatchlistAggregateItem>> {
        ctx.ensure_active("GetWatchlistsBySubscription")?;

        let items = self
            .aggregation
            .aggregate_watchlists(ctx, user_id)
            .await
            .map_err(|e| classify_feed("aggregate watchlists", e))?;

        log_info!(
            "Aggregated {} watchlist items for user {}",
            items.len(),
            user_id
        );
        Ok(items)
    }

    pub async fn get_reviews_by_subscription(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<ReviewAggregateItem>> {
        ctx.ensure_active("GetReviewsBySubscription")?;

        let items = self
            .aggregation
            .aggregate_reviews(ctx, user_id)
            .await
            .map_err(|e| classify_feed("aggregate reviews", e))?;

        log_info!("Aggregated {} review items for user {}", items.len(), user_id);
        Ok(items)
    }
}

fn already_subscribed(subscriber_id: UserId, subscribe_to_id: UserId) -> AppError {
    AppError::AlreadyExists(format!(
        "user {} is already subscribed to user {}",
        subscriber_id, subscribe_to_id
    ))
}

fn not_subscribed(subscriber_id: UserId, unsubscribe_from_id: UserId) -> AppError {
    AppError::NotFound(format!(
        "user {} is not subscribed to user {}",
        subscriber_id, unsubscribe_from_id
    ))
}

/// Collapse a lower-layer failure onto the caller-facing taxonomy
///
/// Cancellation and transport outages keep their kind; every other failure
/// below the service is internal, whatever variant it arrived as.
fn classify(operation: &str, err: AppError) -> AppError {
    match err.kind() {
        ErrorKind::Cancelled => {
            log_warn!("{} cancelled: {}", operation, err);
            err
        }
        ErrorKind::Unavailable | ErrorKind::Internal => {
            log_error!("failed to {}: {}", operation, err);
            err
        }
        _ => {
            log_error!("failed to {}: {}", operation, err);
            AppError::InternalError(format!("failed to {}: {}", operation, err.message()))
        }
    }
}

/// Any failure of a feed other than cancellation is internal
///
/// A feed is all-or-nothing: an unreachable downstream service aborts it the
/// same way a bad payload does.
fn classify_feed(operation: &str, err: AppError) -> AppError {
    if err.is_cancelled() {
        log_warn!("{} cancelled: {}", operation, err);
        return err;
    }
    log_error!("failed to {}: {}", operation, err);
    match err.kind() {
        ErrorKind::Internal => err,
        _ => AppError::InternalError(format!("failed to {}: {}", operation, err.message())),
    }
}
