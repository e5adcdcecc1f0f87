use crate::shared::application::RequestContext;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::warn;

/// Shared GET + decode behaviour for all downstream clients
///
/// Holds the base URL of one service and a clone of the process-wide reqwest
/// client. Requests are bounded by the caller's deadline and abandoned as soon
/// as the caller's context is cancelled. No retries are attempted.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    service_name: &'static str,
}

impl HttpGateway {
    pub fn new(client: Client, base_url: impl Into<String>, service_name: &'static str) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_name,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    /// Create an HTTP client with consistent configuration
    pub fn create_http_client(timeout: Duration, user_agent: &str) -> AppResult<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create HTTP client: {}", e))
            })
    }

    /// Classify a downstream status code
    ///
    /// A 404 here means a dangling reference between services, which is an
    /// internal failure for this service rather than a caller-facing NotFound.
    pub fn handle_response_status(status: StatusCode, service_name: &str) -> AppResult<()> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(AppError::ExternalServiceError(format!(
                "{} returned not found",
                service_name
            ))),
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                Err(AppError::ServiceUnavailable(format!(
                    "{} service unavailable ({})",
                    service_name, status
                )))
            }
            _ => Err(AppError::ExternalServiceError(format!(
                "Unexpected status code from {}: {}",
                service_name, status
            ))),
        }
    }

    pub async fn get_json<T>(
        &self,
        ctx: &RequestContext,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        ctx.ensure_active(operation)?;

        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(query);
        if let Some(remaining) = ctx.remaining() {
            request = request.timeout(remaining);
        }

        LogContext::api_call(self.service_name, operation, "GET", None);
        let started = Instant::now();

        let response = ctx
            .run(operation, async { request.send().await.map_err(AppError::from) })
            .await
            .map_err(|e| {
                warn!("{} {} failed: {}", self.service_name, operation, e);
                e
            })?;

        let status = response.status();
        LogContext::api_call(
            self.service_name,
            operation,
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );
        Self::handle_response_status(status, self.service_name)?;

        ctx.run(operation, async {
            response.json::<T>().await.map_err(|e| {
                AppError::SerializationError(format!(
                    "Failed to parse {} response: {}",
                    self.service_name, e
                ))
            })
        })
        .await
    }
}
