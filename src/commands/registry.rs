use axum::routing::{get, post};
use axum::Router;

use crate::modules::subscription::commands::*;

/// Single source of truth for the HTTP route table
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Follow graph
        .route("/subscriptions", post(subscribe).delete(unsubscribe))
        .route("/subscriptions/check", get(is_subscribed))
        .route("/users/:id/subscriptions", get(get_subscriptions))
        .route("/users/:id/subscribers", get(get_subscribers))
        // Aggregated feeds
        .route(
            "/users/:id/subscriptions/watchlists",
            get(get_watchlists_by_subscription),
        )
        .route(
            "/users/:id/subscriptions/reviews",
            get(get_reviews_by_subscription),
        )
        .route("/health", get(health))
        .with_state(state)
}
