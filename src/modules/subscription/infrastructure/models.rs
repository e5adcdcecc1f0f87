/// Diesel models for the subscription table
use crate::modules::subscription::domain::entities::FollowEdge;
use crate::schema::subscription;
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Diesel model for inserting new edges
#[derive(Insertable, Debug)]
#[diesel(table_name = subscription)]
pub struct NewSubscription {
    pub subscriber_id: i64,
    pub user_id: i64,
}

/// Diesel model for querying existing edges
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = subscription)]
pub struct SubscriptionModel {
    pub id: i64,
    pub subscriber_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionModel {
    /// Convert to domain FollowEdge
    pub fn to_follow_edge(self) -> AppResult<FollowEdge> {
        Ok(FollowEdge {
            subscriber_id: id_from_db(self.subscriber_id)?,
            followed_id: id_from_db(self.user_id)?,
            created_at: self.created_at,
        })
    }
}

/// User ids are unsigned in the domain and BIGINT in Postgres
pub fn id_to_db(id: UserId) -> AppResult<i64> {
    i64::try_from(id)
        .map_err(|_| AppError::InvalidArgument(format!("user id {} is out of range", id)))
}

pub fn id_from_db(id: i64) -> AppResult<UserId> {
    UserId::try_from(id)
        .map_err(|_| AppError::DatabaseError(format!("negative user id {} in storage", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::ErrorKind;

    #[test]
    fn ids_beyond_bigint_are_rejected() {
        assert_eq!(id_to_db(42).unwrap(), 42);
        let err = id_to_db(u64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn negative_stored_ids_are_internal() {
        assert_eq!(id_from_db(7).unwrap(), 7);
        assert_eq!(id_from_db(-1).unwrap_err().kind(), ErrorKind::Internal);
    }
}
