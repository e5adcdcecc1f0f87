use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use crate::log_debug;
use crate::modules::subscription::domain::{entities::FollowEdge, repositories::EdgeStore};
use crate::modules::subscription::infrastructure::models::{
    id_from_db, id_to_db, NewSubscription, SubscriptionModel,
};
use crate::schema::subscription;
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::Database;

const TABLE: &str = "subscription";

/// Postgres-backed follow graph
///
/// Blocking diesel work runs on the blocking pool. Reads are raced against the
/// request context, so a cancelled caller returns without waiting for the
/// query. Writes check the context once and then run to completion, so the
/// returned result always matches what was committed. The pair uniqueness and no-self-follow rules are also enforced by
/// table constraints.
pub struct DieselEdgeStore {
    db: Arc<Database>,
}

impl DieselEdgeStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EdgeStore for DieselEdgeStore {
    async fn create(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<FollowEdge> {
        ctx.ensure_active("Create")?;
        let timer = TimedOperation::new("edge_store_create");
        let db = Arc::clone(&self.db);
        let new_edge = NewSubscription {
            subscriber_id: id_to_db(subscriber_id)?,
            user_id: id_to_db(followed_id)?,
        };

        LogContext::db_operation("insert", TABLE, None);
        // Not raced: the blocking insert cannot be aborted once started
        let model = task::spawn_blocking(move || -> AppResult<SubscriptionModel> {
            let mut conn = db.get_connection()?;
            let model = diesel::insert_into(subscription::table)
                .values(&new_edge)
                .returning(SubscriptionModel::as_returning())
                .get_result(&mut conn)?;
            Ok(model)
        })
        .await??;

        LogContext::db_operation("insert", TABLE, Some(timer.elapsed_ms()));
        model.to_follow_edge()
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<()> {
        ctx.ensure_active("Delete")?;
        let timer = TimedOperation::new("edge_store_delete");
        let db = Arc::clone(&self.db);
        let subscriber = id_to_db(subscriber_id)?;
        let followed = id_to_db(followed_id)?;

        LogContext::db_operation("delete", TABLE, None);
        let deleted = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            let rows = diesel::delete(
                subscription::table
                    .filter(subscription::subscriber_id.eq(subscriber))
                    .filter(subscription::user_id.eq(followed)),
            )
            .execute(&mut conn)?;
            Ok(rows)
        })
        .await??;

        LogContext::db_operation("delete", TABLE, Some(timer.elapsed_ms()));
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "no edge from {} to {}",
                subscriber_id, followed_id
            )));
        }
        Ok(())
    }

    async fn list_followed(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<Vec<UserId>> {
        ctx.ensure_active("ListFollowed")?;
        let db = Arc::clone(&self.db);
        let subscriber = id_to_db(user_id)?;

        let ids = ctx
            .run("ListFollowed", async move {
                task::spawn_blocking(move || -> AppResult<Vec<i64>> {
                    let mut conn = db.get_connection()?;
                    let ids = subscription::table
                        .filter(subscription::subscriber_id.eq(subscriber))
                        .order(subscription::id.asc())
                        .select(subscription::user_id)
                        .load::<i64>(&mut conn)?;
                    Ok(ids)
                })
                .await?
            })
            .await?;

        log_debug!("User {} follows {} users", user_id, ids.len());
        ids.into_iter().map(id_from_db).collect()
    }

    async fn list_followers(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<UserId>> {
        ctx.ensure_active("ListFollowers")?;
        let db = Arc::clone(&self.db);
        let followed = id_to_db(user_id)?;

        let ids = ctx
            .run("ListFollowers", async move {
                task::spawn_blocking(move || -> AppResult<Vec<i64>> {
                    let mut conn = db.get_connection()?;
                    let ids = subscription::table
                        .filter(subscription::user_id.eq(followed))
                        .order(subscription::id.asc())
                        .select(subscription::subscriber_id)
                        .load::<i64>(&mut conn)?;
                    Ok(ids)
                })
                .await?
            })
            .await?;

        log_debug!("User {} has {} followers", user_id, ids.len());
        ids.into_iter().map(id_from_db).collect()
    }

    async fn exists(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<bool> {
        ctx.ensure_active("Exists")?;
        let db = Arc::clone(&self.db);
        let subscriber = id_to_db(subscriber_id)?;
        let followed = id_to_db(followed_id)?;

        ctx.run("Exists", async move {
            task::spawn_blocking(move || -> AppResult<bool> {
                let mut conn = db.get_connection()?;
                let found = diesel::select(diesel::dsl::exists(
                    subscription::table
                        .filter(subscription::subscriber_id.eq(subscriber))
                        .filter(subscription::user_id.eq(followed)),
                ))
                .get_result::<bool>(&mut conn)?;
                Ok(found)
            })
            .await?
        })
        .await
    }
}
