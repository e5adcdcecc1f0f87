/// Test doubles for the edge store and the downstream gateways
use async_trait::async_trait;
use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use subscription_lib::modules::gateway::{
    CatalogGateway, IdentityGateway, MediaRecord, ReviewRecord, ReviewSource, UserProfile,
    WatchlistEntry, WatchlistSource,
};
use subscription_lib::modules::subscription::{EdgeStore, FollowEdge};
use subscription_lib::shared::{AppError, AppResult, MediaId, RequestContext, UserId};
use tokio::sync::RwLock;

/// Edge store kept in memory, with the same pair uniqueness the table enforces
#[derive(Default)]
pub struct InMemoryEdgeStore {
    edges: RwLock<Vec<FollowEdge>>,
    calls: AtomicUsize,
    failure: Mutex<Option<AppError>>,
}

impl InMemoryEdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edges(pairs: &[(UserId, UserId)]) -> Self {
        let edges = pairs
            .iter()
            .map(|(subscriber, followed)| FollowEdge::new(*subscriber, *followed))
            .collect();
        Self {
            edges: RwLock::new(edges),
            ..Self::default()
        }
    }

    /// Number of store operations invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every following operation fail with `err`
    pub fn fail_with(&self, err: AppError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub async fn edge_count(&self, subscriber_id: UserId, followed_id: UserId) -> usize {
        self.edges
            .read()
            .await
            .iter()
            .filter(|e| e.subscriber_id == subscriber_id && e.followed_id == followed_id)
            .count()
    }

    fn begin(&self, ctx: &RequestContext, operation: &str) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.ensure_active(operation)?;
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EdgeStore for InMemoryEdgeStore {
    async fn create(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<FollowEdge> {
        self.begin(ctx, "Create")?;
        let mut edges = self.edges.write().await;
        if edges
            .iter()
            .any(|e| e.subscriber_id == subscriber_id && e.followed_id == followed_id)
        {
            return Err(AppError::AlreadyExists(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        let edge = FollowEdge::new(subscriber_id, followed_id);
        edges.push(edge.clone());
        Ok(edge)
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<()> {
        self.begin(ctx, "Delete")?;
        let mut edges = self.edges.write().await;
        let before = edges.len();
        edges.retain(|e| !(e.subscriber_id == subscriber_id && e.followed_id == followed_id));
        if edges.len() == before {
            return Err(AppError::NotFound("no such edge".to_string()));
        }
        Ok(())
    }

    async fn list_followed(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<Vec<UserId>> {
        self.begin(ctx, "ListFollowed")?;
        Ok(self
            .edges
            .read()
            .await
            .iter()
            .filter(|e| e.subscriber_id == user_id)
            .map(|e| e.followed_id)
            .collect())
    }

    async fn list_followers(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<UserId>> {
        self.begin(ctx, "ListFollowers")?;
        Ok(self
            .edges
            .read()
            .await
            .iter()
            .filter(|e| e.followed_id == user_id)
            .map(|e| e.subscriber_id)
            .collect())
    }

    async fn exists(
        &self,
        ctx: &RequestContext,
        subscriber_id: UserId,
        followed_id: UserId,
    ) -> AppResult<bool> {
        self.begin(ctx, "Exists")?;
        Ok(self
            .edges
            .read()
            .await
            .iter()
            .any(|e| e.subscriber_id == subscriber_id && e.followed_id == followed_id))
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl EdgeStore for Store {
        async fn create(&self, ctx: &RequestContext, subscriber_id: UserId, followed_id: UserId) -> AppResult<FollowEdge>;
        async fn delete(&self, ctx: &RequestContext, subscriber_id: UserId, followed_id: UserId) -> AppResult<()>;
        async fn list_followed(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<Vec<UserId>>;
        async fn list_followers(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<Vec<UserId>>;
        async fn exists(&self, ctx: &RequestContext, subscriber_id: UserId, followed_id: UserId) -> AppResult<bool>;
    }
}

mock! {
    pub Identity {}

    #[async_trait]
    impl IdentityGateway for Identity {
        async fn get_by_id(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<UserProfile>;
    }
}

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogGateway for Catalog {
        async fn get_by_id(&self, ctx: &RequestContext, media_id: MediaId) -> AppResult<MediaRecord>;
    }
}

mock! {
    pub Watchlists {}

    #[async_trait]
    impl WatchlistSource for Watchlists {
        async fn get_by_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<Vec<WatchlistEntry>>;
    }
}

mock! {
    pub Reviews {}

    #[async_trait]
    impl ReviewSource for Reviews {
        async fn get_by_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<Vec<ReviewRecord>>;
    }
}
