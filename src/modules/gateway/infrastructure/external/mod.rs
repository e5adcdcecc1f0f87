pub mod catalog;
pub mod common;
pub mod identity;
pub mod review;
pub mod watchlist;

pub use catalog::CatalogClient;
pub use common::HttpGateway;
pub use identity::IdentityClient;
pub use review::ReviewClient;
pub use watchlist::WatchlistClient;
