/// HTTP transport tests - routes, status mapping and payload shapes
mod utils;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use mockall::predicate::{always, eq};
use serde_json::{json, Value};
use std::sync::Arc;
use subscription_lib::shared::AppError;
use tower::ServiceExt;
use utils::fakes::InMemoryEdgeStore;
use utils::helpers::{build_app, entry, media, review, user, GatewayMocks};

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn subscribe_then_duplicate_is_conflict() {
    let app = build_app(Arc::new(InMemoryEdgeStore::new()), GatewayMocks::new());
    let body = json!({ "subscriber_id": 1, "subscribe_to_id": 2 });

    let (status, payload) = send(&app, json_request(Method::POST, "/subscriptions", body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!({ "success": true }));

    let (status, payload) = send(&app, json_request(Method::POST, "/subscriptions", body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(payload["error"]["code"], "already_exists");
}

#[tokio::test]
async fn self_follow_is_bad_request() {
    let app = build_app(Arc::new(InMemoryEdgeStore::new()), GatewayMocks::new());

    let (status, payload) = send(
        &app,
        json_request(
            Method::POST,
            "/subscriptions",
            json!({ "subscriber_id": 4, "subscribe_to_id": 4 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"]["code"], "invalid_argument");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = build_app(Arc::new(InMemoryEdgeStore::new()), GatewayMocks::new());

    let (status, payload) = send(
        &app,
        json_request(Method::POST, "/subscriptions", json!({ "subscriber_id": "one" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"]["code"], "invalid_argument");
}

#[tokio::test]
async fn unsubscribe_without_edge_is_not_found() {
    let app = build_app(Arc::new(InMemoryEdgeStore::new()), GatewayMocks::new());

    let (status, payload) = send(
        &app,
        json_request(
            Method::DELETE,
            "/subscriptions",
            json!({ "subscriber_id": 1, "unsubscribe_from_id": 2 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["error"]["code"], "not_found");
}

#[tokio::test]
async fn listings_and_check_reflect_the_graph() {
    let store = Arc::new(InMemoryEdgeStore::with_edges(&[(1, 2), (1, 3), (4, 2)]));
    let app = build_app(store, GatewayMocks::new());

    let (status, payload) = send(&app, get_request("/users/1/subscriptions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!({ "subscribed_to_ids": [2, 3] }));

    let (_, payload) = send(&app, get_request("/users/2/subscribers")).await;
    assert_eq!(payload, json!({ "subscriber_ids": [1, 4] }));

    let (_, payload) = send(
        &app,
        get_request("/subscriptions/check?subscriber_id=1&subscribe_to_id=3"),
    )
    .await;
    assert_eq!(payload, json!({ "is_subscribed": true }));

    let (_, payload) = send(
        &app,
        get_request("/subscriptions/check?subscriber_id=3&subscribe_to_id=1"),
    )
    .await;
    assert_eq!(payload, json!({ "is_subscribed": false }));
}

#[tokio::test]
async fn unsubscribe_removes_edge() {
    let store = Arc::new(InMemoryEdgeStore::with_edges(&[(1, 2)]));
    let app = build_app(store.clone(), GatewayMocks::new());

    let (status, _) = send(
        &app,
        json_request(
            Method::DELETE,
            "/subscriptions",
            json!({ "subscriber_id": 1, "unsubscribe_from_id": 2 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.edge_count(1, 2).await, 0);
}

#[tokio::test]
async fn non_numeric_user_id_is_bad_request() {
    let app = build_app(Arc::new(InMemoryEdgeStore::new()), GatewayMocks::new());

    let (status, payload) = send(&app, get_request("/users/bob/subscriptions")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"]["code"], "invalid_argument");
}

#[tokio::test]
async fn watchlist_feed_is_returned() {
    let store = Arc::new(InMemoryEdgeStore::with_edges(&[(1, 2)]));
    let mut mocks = GatewayMocks::new();
    mocks
        .watchlists
        .expect_get_by_user()
        .with(always(), eq(2))
        .returning(|_, _| Ok(vec![entry(42, 2)]));
    mocks
        .catalog
        .expect_get_by_id()
        .returning(|_, _| Ok(media(42, "Film", "d", 2001)));
    mocks
        .identity
        .expect_get_by_id()
        .returning(|_, _| Ok(user(2, "bob")));
    let app = build_app(store, mocks);

    let (status, payload) = send(&app, get_request("/users/1/subscriptions/watchlists")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payload,
        json!({
            "watchlists": [{
                "media_id": 42,
                "user_id": 2,
                "user_name": "bob",
                "title": "Film",
                "description": "d"
            }]
        })
    );
}

#[tokio::test]
async fn review_feed_is_returned() {
    let store = Arc::new(InMemoryEdgeStore::with_edges(&[(1, 2)]));
    let mut mocks = GatewayMocks::new();
    mocks
        .reviews
        .expect_get_by_user()
        .returning(|_, _| Ok(vec![review(500, 2, "great pacing", 9, 42)]));
    mocks
        .catalog
        .expect_get_by_id()
        .returning(|_, _| Ok(media(42, "Film", "d", 2001)));
    mocks
        .identity
        .expect_get_by_id()
        .returning(|_, _| Ok(user(2, "bob")));
    let app = build_app(store, mocks);

    let (status, payload) = send(&app, get_request("/users/1/subscriptions/reviews")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["reviews"][0]["review_id"], 500);
    assert_eq!(payload["reviews"][0]["media_name"], "Film");
    assert_eq!(payload["reviews"][0]["media_year"], 2001);
    assert_eq!(payload["reviews"][0]["user_name"], "bob");
}

#[tokio::test]
async fn internal_details_are_not_leaked() {
    let store = Arc::new(InMemoryEdgeStore::new());
    store.fail_with(AppError::DatabaseError(
        "password authentication failed for user \"watch\"".to_string(),
    ));
    let app = build_app(store, GatewayMocks::new());

    let (status, payload) = send(&app, get_request("/users/1/subscribers")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload["error"]["code"], "internal");
    assert!(!payload.to_string().contains("password"));
}

#[tokio::test]
async fn downstream_outage_in_feed_is_internal() {
    let store = Arc::new(InMemoryEdgeStore::with_edges(&[(1, 2)]));
    let mut mocks = GatewayMocks::new();
    mocks
        .watchlists
        .expect_get_by_user()
        .returning(|_, _| Err(AppError::ServiceUnavailable("watchlist down".to_string())));
    let app = build_app(store, mocks);

    let (status, payload) = send(&app, get_request("/users/1/subscriptions/watchlists")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload["error"]["code"], "internal");
    assert!(!payload.to_string().contains("watchlist down"));
}

#[tokio::test]
async fn pool_outage_on_listing_is_service_unavailable() {
    let store = Arc::new(InMemoryEdgeStore::new());
    store.fail_with(AppError::ServiceUnavailable("pool timed out".to_string()));
    let app = build_app(store, GatewayMocks::new());

    let (status, payload) = send(&app, get_request("/users/1/subscriptions")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(payload["error"]["code"], "unavailable");
}

#[tokio::test]
async fn zero_timeout_header_is_cancelled() {
    let store = Arc::new(InMemoryEdgeStore::with_edges(&[(1, 2)]));
    let app = build_app(store.clone(), GatewayMocks::new());

    let request = Request::builder()
        .uri("/users/1/subscriptions")
        .header("x-request-timeout-ms", "0")
        .body(Body::empty())
        .unwrap();
    let (status, payload) = send(&app, request).await;

    assert_eq!(status.as_u16(), 499);
    assert_eq!(payload["error"]["code"], "cancelled");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn health_reports_service_name() {
    let app = build_app(Arc::new(InMemoryEdgeStore::new()), GatewayMocks::new());

    let (status, payload) = send(&app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["service"], "subscription-test");
    assert!(payload["database"].is_null());
}
