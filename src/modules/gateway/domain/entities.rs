use crate::shared::domain::{MediaId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// Display data owned by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
}

/// Catalog metadata for one media title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: MediaId,
    pub name_en: String,
    pub description: String,
    pub year: i32,
}

/// One entry of a user's watchlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub media_id: MediaId,
    pub user_id: UserId,
}

/// A review written by a user about one media title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: ReviewId,
    pub user_id: UserId,
    pub content: String,
    pub rating: i32,
    pub media_id: MediaId,
}
