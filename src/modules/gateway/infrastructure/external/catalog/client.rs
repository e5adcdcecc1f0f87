use crate::modules::gateway::domain::MediaRecord;
use crate::modules::gateway::infrastructure::external::HttpGateway;
use crate::modules::gateway::traits::CatalogGateway;
use crate::shared::application::RequestContext;
use crate::shared::domain::MediaId;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use reqwest::Client;

use super::dto::MediaDto;

/// Media catalog client
pub struct CatalogClient {
    http: HttpGateway,
}

impl CatalogClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http: HttpGateway::new(client, base_url, "media"),
        }
    }
}

#[async_trait]
impl CatalogGateway for CatalogClient {
    async fn get_by_id(&self, ctx: &RequestContext, media_id: MediaId) -> AppResult<MediaRecord> {
        let media: MediaDto = self
            .http
            .get_json(ctx, "GetMediaByID", &format!("/media/{}", media_id), &[])
            .await?;

        Ok(media.into())
    }
}
