//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the routes with the cross-cutting tower layers:
//! request tracing, CORS, and a whole-request timeout. When the timeout fires
//! the handler future is dropped, which abandons any in-flight provider calls.

pub mod recommendation;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use recommendation::{recommendation_router, RecommendationAppState};

/// Builds the full application router.
///
/// An empty origin list, or one containing `*`, allows any origin.
pub fn app_router(
    state: RecommendationAppState,
    cors_origins: &[String],
    request_timeout: Duration,
) -> Router {
    recommendation_router()
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(
            origins.iter().filter_map(|o| o.parse::<HeaderValue>().ok()),
        ))
    }
}
