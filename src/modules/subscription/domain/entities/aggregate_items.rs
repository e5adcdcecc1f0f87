use crate::shared::domain::{MediaId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// A followed user's watchlist entry joined with catalog metadata and the
/// owner's display name. Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistAggregateItem {
    pub media_id: MediaId,
    pub user_id: UserId,
    pub user_name: String,
    pub title: String,
    pub description: String,
}

/// A followed user's review joined with catalog title/year and the author's
/// display name. Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAggregateItem {
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub user_name: String,
    pub content: String,
    pub rating: i32,
    pub media_name: String,
    pub media_year: i32,
}
