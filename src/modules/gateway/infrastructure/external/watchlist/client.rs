use crate::modules::gateway::domain::WatchlistEntry;
use crate::modules::gateway::infrastructure::external::HttpGateway;
use crate::modules::gateway::traits::WatchlistSource;
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::dto::GetWatchlistResponse;

/// Watchlist store client
pub struct WatchlistClient {
    http: HttpGateway,
}

impl WatchlistClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http: HttpGateway::new(client, base_url, "watchlist"),
        }
    }
}

#[async_trait]
impl WatchlistSource for WatchlistClient {
    async fn get_by_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<WatchlistEntry>> {
        let response: GetWatchlistResponse = self
            .http
            .get_json(
                ctx,
                "GetWatchlist",
                "/watchlists",
                &[("user_id", user_id.to_string())],
            )
            .await?;

        debug!(
            "Watchlist service returned {} entries for user {}",
            response.watchlists.len(),
            user_id
        );
        Ok(response.watchlists.into_iter().map(Into::into).collect())
    }
}
