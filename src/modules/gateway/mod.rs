/// Downstream gateways
///
/// Thin clients for the four services the subscription feeds are joined from:
/// the user directory, the media catalog, the watchlist store and the review
/// store.
///
/// Architecture:
/// - Domain: records returned by each service
/// - Traits: one port per service, injected into the aggregation engine
/// - Infrastructure: reqwest-based HTTP clients
pub mod domain;
pub mod infrastructure;
pub mod traits;

// Re-exports for easy access
pub use domain::{MediaRecord, ReviewRecord, UserProfile, WatchlistEntry};
pub use infrastructure::{
    CatalogClient, DownstreamGateways, HttpGateway, IdentityClient, ReviewClient, WatchlistClient,
};
pub use traits::{CatalogGateway, IdentityGateway, ReviewSource, WatchlistSource};
