pub mod entities;
pub mod repositories;
pub mod services;

// Re-exports for easy access
pub use entities::{FollowEdge, ReviewAggregateItem, WatchlistAggregateItem};
pub use repositories::EdgeStore;
pub use services::AggregationEngine;
