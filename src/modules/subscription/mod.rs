/// Subscription module - the follow graph and the feeds built on top of it
///
/// Architecture:
/// - Domain: FollowEdge, aggregate items, EdgeStore port, AggregationEngine
/// - Application: SubscriptionService orchestrating validation and delegation
/// - Infrastructure: diesel-backed EdgeStore
/// - Commands: axum handlers
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::SubscriptionService;
pub use commands::AppState;
pub use domain::{
    AggregationEngine, EdgeStore, FollowEdge, ReviewAggregateItem, WatchlistAggregateItem,
};
pub use infrastructure::DieselEdgeStore;
