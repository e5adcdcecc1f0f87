pub mod aggregate_items;
pub mod follow_edge;

pub use aggregate_items::{ReviewAggregateItem, WatchlistAggregateItem};
pub use follow_edge::FollowEdge;
