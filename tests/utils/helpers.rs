/// Test helper functions and service builders
use super::fakes::{MockCatalog, MockIdentity, MockReviews, MockWatchlists};
use std::sync::Arc;
use subscription_lib::commands::build_router;
use subscription_lib::modules::gateway::{
    DownstreamGateways, MediaRecord, ReviewRecord, UserProfile, WatchlistEntry,
};
use subscription_lib::modules::subscription::{
    AggregationEngine, AppState, EdgeStore, SubscriptionService,
};
use std::time::Duration;

/// Mocks for the four downstream services; unset expectations fail the test
pub struct GatewayMocks {
    pub identity: MockIdentity,
    pub catalog: MockCatalog,
    pub watchlists: MockWatchlists,
    pub reviews: MockReviews,
}

impl GatewayMocks {
    pub fn new() -> Self {
        Self {
            identity: MockIdentity::new(),
            catalog: MockCatalog::new(),
            watchlists: MockWatchlists::new(),
            reviews: MockReviews::new(),
        }
    }

    pub fn into_gateways(self) -> DownstreamGateways {
        DownstreamGateways {
            identity: Arc::new(self.identity),
            catalog: Arc::new(self.catalog),
            watchlists: Arc::new(self.watchlists),
            reviews: Arc::new(self.reviews),
        }
    }
}

pub fn build_engine(edge_store: Arc<dyn EdgeStore>, mocks: GatewayMocks) -> AggregationEngine {
    AggregationEngine::with_gateways(edge_store, mocks.into_gateways())
}

pub fn build_service(edge_store: Arc<dyn EdgeStore>, mocks: GatewayMocks) -> SubscriptionService {
    let engine = Arc::new(build_engine(Arc::clone(&edge_store), mocks));
    SubscriptionService::new(edge_store, engine)
}

pub fn build_app(edge_store: Arc<dyn EdgeStore>, mocks: GatewayMocks) -> axum::Router {
    build_router(AppState {
        service: Arc::new(build_service(edge_store, mocks)),
        service_name: "subscription-test".to_string(),
        default_timeout: Duration::from_secs(5),
        db: None,
    })
}

pub fn user(id: u64, username: &str) -> UserProfile {
    UserProfile {
        id,
        username: username.to_string(),
    }
}

pub fn media(id: u64, name_en: &str, description: &str, year: i32) -> MediaRecord {
    MediaRecord {
        id,
        name_en: name_en.to_string(),
        description: description.to_string(),
        year,
    }
}

pub fn entry(media_id: u64, user_id: u64) -> WatchlistEntry {
    WatchlistEntry { media_id, user_id }
}

pub fn review(id: u64, user_id: u64, content: &str, rating: i32, media_id: u64) -> ReviewRecord {
    ReviewRecord {
        id,
        user_id,
        content: content.to_string(),
        rating,
        media_id,
    }
}
