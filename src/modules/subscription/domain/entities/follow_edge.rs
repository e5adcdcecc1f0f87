use crate::shared::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed follow relationship: `subscriber_id` follows `followed_id`
///
/// Unique per pair and never reflexive. Edges are created and deleted but
/// never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowEdge {
    pub subscriber_id: UserId,
    pub followed_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl FollowEdge {
    pub fn new(subscriber_id: UserId, followed_id: UserId) -> Self {
        Self {
            subscriber_id,
            followed_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_self_follow(&self) -> bool {
        self.subscriber_id == self.followed_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_self_follow() {
        assert!(FollowEdge::new(3, 3).is_self_follow());
        assert!(!FollowEdge::new(3, 4).is_self_follow());
    }
}
