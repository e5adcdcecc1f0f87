use crate::modules::gateway::traits::{
    CatalogGateway, IdentityGateway, ReviewSource, WatchlistSource,
};
use crate::modules::gateway::DownstreamGateways;
use crate::modules::subscription::domain::entities::{ReviewAggregateItem, WatchlistAggregateItem};
use crate::modules::subscription::domain::repositories::EdgeStore;
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use crate::{log_debug, log_error};
use std::sync::Arc;

/// Builds the subscription feeds by joining the follow graph with the four
/// downstream services
///
/// Traversal is sequential: followed users in edge-store order, then each
/// user's items in the downstream service's order. Every item costs one
/// catalog and one identity lookup, so a request issues O(F x I) remote calls
/// with no batching. The first failing call aborts the whole aggregate and
/// any items joined so far are dropped.
pub struct AggregationEngine {
    edge_store: Arc<dyn EdgeStore>,
    identity: Arc<dyn IdentityGateway>,
    catalog: Arc<dyn CatalogGateway>,
    watchlists: Arc<dyn WatchlistSource>,
    reviews: Arc<dyn ReviewSource>,
}

impl AggregationEngine {
    pub fn new(
        edge_store: Arc<dyn EdgeStore>,
        identity: Arc<dyn IdentityGateway>,
        catalog: Arc<dyn CatalogGateway>,
        watchlists: Arc<dyn WatchlistSource>,
        reviews: Arc<dyn ReviewSource>,
    ) -> Self {
        Self {
            edge_store,
            identity,
            catalog,
            watchlists,
            reviews,
        }
    }

    pub fn with_gateways(edge_store: Arc<dyn EdgeStore>, gateways: DownstreamGateways) -> Self {
        Self::new(
            edge_store,
            gateways.identity,
            gateways.catalog,
            gateways.watchlists,
            gateways.reviews,
        )
    }

    pub async fn aggregate_watchlists(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<WatchlistAggregateItem>> {
        ctx.ensure_active("AggregateWatchlists")?;
        let timer = TimedOperation::new("aggregate_watchlists");

        let followed_ids = self.edge_store.list_followed(ctx, user_id).await?;
        if followed_ids.is_empty() {
            log_debug!("User {} follows nobody, watchlist feed is empty", user_id);
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for followed_id in followed_ids {
            let entries = self
                .watchlists
                .get_by_user(ctx, followed_id)
                .await
                .map_err(|e| {
                    log_error!("failed to get watchlist for user {}: {}", followed_id, e);
                    e
                })?;

            for entry in entries {
                let media = self.catalog.get_by_id(ctx, entry.media_id).await.map_err(|e| {
                    log_error!("failed to get media {} from catalog: {}", entry.media_id, e);
                    e
                })?;
                let user = self.identity.get_by_id(ctx, followed_id).await.map_err(|e| {
                    log_error!("failed to get user {} from directory: {}", followed_id, e);
                    e
                })?;

                items.push(WatchlistAggregateItem {
                    media_id: entry.media_id,
                    user_id: followed_id,
                    user_name: user.username,
                    title: media.name_en,
                    description: media.description,
                });
            }
        }

        timer.finish_with_info(&format!("user {}, {} items", user_id, items.len()));
        Ok(items)
    }

    pub async fn aggregate_reviews(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<ReviewAggregateItem>> {
        ctx.ensure_active("AggregateReviews")?;
        let timer = TimedOperation::new("aggregate_reviews");

        let followed_ids = self.edge_store.list_followed(ctx, user_id).await?;
        if followed_ids.is_empty() {
            log_debug!("User {} follows nobody, review feed is empty", user_id);
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for followed_id in followed_ids {
            let reviews = self.reviews.get_by_user(ctx, followed_id).await.map_err(|e| {
                log_error!("failed to get reviews for user {}: {}", followed_id, e);
                e
            })?;

            for review in reviews {
                let media = self.catalog.get_by_id(ctx, review.media_id).await.map_err(|e| {
                    log_error!("failed to get media {} from catalog: {}", review.media_id, e);
                    e
                })?;
                let user = self.identity.get_by_id(ctx, followed_id).await.map_err(|e| {
                    log_error!("failed to get user {} from directory: {}", followed_id, e);
                    e
                })?;

                items.push(ReviewAggregateItem {
                    review_id: review.id,
                    user_id: followed_id,
                    user_name: user.username,
                    content: review.content,
                    rating: review.rating,
                    media_name: media.name_en,
                    media_year: media.year,
                });
            }
        }

        timer.finish_with_info(&format!("user {}, {} items", user_id, items.len()));
        Ok(items)
    }
}
