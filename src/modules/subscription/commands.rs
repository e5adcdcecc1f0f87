use super::application::service::SubscriptionService;
use super::domain::entities::{ReviewAggregateItem, WatchlistAggregateItem};
use crate::shared::application::RequestContext;
use crate::shared::domain::UserId;
use crate::shared::errors::{AppError, ErrorKind};
use crate::shared::infrastructure::{Database, PoolStatus};
use crate::{log_debug, log_error};

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Optional per-request budget in milliseconds; overrides `REQUEST_TIMEOUT_MS`
pub const REQUEST_TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Non-standard "client closed request" status used for cancelled calls
const STATUS_CLIENT_CLOSED_REQUEST: u16 = 499;

/// Shared handler state, cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SubscriptionService>,
    pub service_name: String,
    pub default_timeout: Duration,
    pub db: Option<Arc<Database>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub subscriber_id: UserId,
    pub subscribe_to_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    pub subscriber_id: UserId,
    pub unsubscribe_from_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsSubscribedQuery {
    pub subscriber_id: UserId,
    pub subscribe_to_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionsResponse {
    pub subscribed_to_ids: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribersResponse {
    pub subscriber_ids: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsSubscribedResponse {
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistsResponse {
    pub watchlists: Vec<WatchlistAggregateItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewAggregateItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub database: Option<PoolStatus>,
}

/// HTTP face of an `AppError`
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists => StatusCode::CONFLICT,
            ErrorKind::Cancelled => StatusCode::from_u16(STATUS_CLIENT_CLOSED_REQUEST)
                .unwrap_or(StatusCode::REQUEST_TIMEOUT),
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::InvalidArgument(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::InvalidArgument(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::InvalidArgument(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.0.kind();

        // Storage and downstream details stay in the logs
        let message = match kind {
            ErrorKind::Internal => {
                log_error!("request failed: {}", self.0);
                "internal error".to_string()
            }
            ErrorKind::Unavailable => {
                log_error!("request failed: {}", self.0);
                "service temporarily unavailable".to_string()
            }
            _ => self.0.message().to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": kind.as_str(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Build the per-request context from the timeout header or the configured default
pub fn request_context(
    headers: &HeaderMap,
    default_timeout: Duration,
) -> Result<RequestContext, ApiError> {
    let timeout = match headers.get(REQUEST_TIMEOUT_HEADER) {
        Some(value) => {
            let millis = value
                .to_str()
                .ok()
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .ok_or_else(|| {
                    AppError::InvalidArgument(format!(
                        "{} must be a whole number of milliseconds",
                        REQUEST_TIMEOUT_HEADER
                    ))
                })?;
            Duration::from_millis(millis)
        }
        None => default_timeout,
    };

    Ok(RequestContext::with_timeout(timeout))
}

pub async fn subscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<SuccessResponse> {
    let Json(request) = payload?;
    let ctx = request_context(&headers, state.default_timeout)?;
    log_debug!(
        "Subscribe request: {} -> {}",
        request.subscriber_id,
        request.subscribe_to_id
    );

    state
        .service
        .subscribe(&ctx, request.subscriber_id, request.subscribe_to_id)
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UnsubscribeRequest>, JsonRejection>,
) -> ApiResult<SuccessResponse> {
    let Json(request) = payload?;
    let ctx = request_context(&headers, state.default_timeout)?;
    log_debug!(
        "Unsubscribe request: {} -> {}",
        request.subscriber_id,
        request.unsubscribe_from_id
    );

    state
        .service
        .unsubscribe(&ctx, request.subscriber_id, request.unsubscribe_from_id)
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_subscriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<SubscriptionsResponse> {
    let Path(user_id) = user_id?;
    let ctx = request_context(&headers, state.default_timeout)?;

    let subscribed_to_ids = state.service.get_subscriptions(&ctx, user_id).await?;
    Ok(Json(SubscriptionsResponse { subscribed_to_ids }))
}

pub async fn get_subscribers(
    State(state): State<AppState>,
    headers: HeaderMap,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<SubscribersResponse> {
    let Path(user_id) = user_id?;
    let ctx = request_context(&headers, state.default_timeout)?;

    let subscriber_ids = state.service.get_subscribers(&ctx, user_id).await?;
    Ok(Json(SubscribersResponse { subscriber_ids }))
}

pub async fn is_subscribed(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<IsSubscribedQuery>, QueryRejection>,
) -> ApiResult<IsSubscribedResponse> {
    let Query(query) = query?;
    let ctx = request_context(&headers, state.default_timeout)?;

    let is_subscribed = state
        .service
        .is_subscribed(&ctx, query.subscriber_id, query.subscribe_to_id)
        .await?;
    Ok(Json(IsSubscribedResponse { is_subscribed }))
}

pub async fn get_watchlists_by_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<WatchlistsResponse> {
    let Path(user_id) = user_id?;
    let ctx = request_context(&headers, state.default_timeout)?;

    let watchlists = state
        .service
        .get_watchlists_by_subscription(&ctx, user_id)
        .await?;
    Ok(Json(WatchlistsResponse { watchlists }))
}

pub async fn get_reviews_by_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    user_id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<ReviewsResponse> {
    let Path(user_id) = user_id?;
    let ctx = request_context(&headers, state.default_timeout)?;

    let reviews = state
        .service
        .get_reviews_by_subscription(&ctx, user_id)
        .await?;
    Ok(Json(ReviewsResponse { reviews }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.service_name.clone(),
        database: state.db.as_ref().map(|db| db.pool_status()),
    })
}
