pub mod external;

pub use external::{
    CatalogClient, HttpGateway, IdentityClient, ReviewClient, WatchlistClient,
};

use crate::modules::gateway::traits::{
    CatalogGateway, IdentityGateway, ReviewSource, WatchlistSource,
};
use crate::shared::config::DownstreamEndpoints;
use crate::shared::errors::AppResult;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = "subscription-service/1.0";

/// The four downstream handles, constructed once at startup
#[derive(Clone)]
pub struct DownstreamGateways {
    pub identity: Arc<dyn IdentityGateway>,
    pub catalog: Arc<dyn CatalogGateway>,
    pub watchlists: Arc<dyn WatchlistSource>,
    pub reviews: Arc<dyn ReviewSource>,
}

impl DownstreamGateways {
    /// Build HTTP clients for every endpoint, sharing one connection pool
    pub fn connect(endpoints: &DownstreamEndpoints, timeout: Duration) -> AppResult<Self> {
        let client = HttpGateway::create_http_client(timeout, USER_AGENT)?;

        Ok(Self {
            identity: Arc::new(IdentityClient::new(
                client.clone(),
                endpoints.user_service.as_str(),
            )),
            catalog: Arc::new(CatalogClient::new(
                client.clone(),
                endpoints.media_service.as_str(),
            )),
            watchlists: Arc::new(WatchlistClient::new(
                client.clone(),
                endpoints.watchlist_service.as_str(),
            )),
            reviews: Arc::new(ReviewClient::new(client, endpoints.review_service.as_str())),
        })
    }
}
