use crate::modules::gateway::domain::ReviewRecord;
use crate::modules::gateway::infrastructure::external::HttpGateway;
use crate::modules::gateway::traits::ReviewSource;
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::dto::GetByUserResponse;

/// Review store client
pub struct ReviewClient {
    http: HttpGateway,
}

impl ReviewClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http: HttpGateway::new(client, base_url, "review"),
        }
    }
}

#[async_trait]
impl ReviewSource for ReviewClient {
    async fn get_by_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<Vec<ReviewRecord>> {
        let response: GetByUserResponse = self
            .http
            .get_json(
                ctx,
                "GetByUser",
                "/reviews",
                &[("user_id", user_id.to_string())],
            )
            .await?;

        debug!(
            "Review service returned {} reviews for user {}",
            response.reviews.len(),
            user_id
        );
        Ok(response.reviews.into_iter().map(Into::into).collect())
    }
}
