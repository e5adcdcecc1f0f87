use crate::modules::gateway::domain::UserProfile;
use crate::modules::gateway::infrastructure::external::HttpGateway;
use crate::modules::gateway::traits::IdentityGateway;
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::dto::GetUserResponse;

/// User directory client
pub struct IdentityClient {
    http: HttpGateway,
}

impl IdentityClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http: HttpGateway::new(client, base_url, "user"),
        }
    }
}

#[async_trait]
impl IdentityGateway for IdentityClient {
    async fn get_by_id(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<UserProfile> {
        let response: GetUserResponse = self
            .http
            .get_json(ctx, "GetByID", &format!("/users/{}", user_id), &[])
            .await?;

        debug!("Resolved user {} as '{}'", user_id, response.user.username);
        Ok(response.user.into())
    }
}
