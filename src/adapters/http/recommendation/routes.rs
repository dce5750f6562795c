//! Route definitions for recommendation endpoints

use axum::routing::get;
use axum::Router;

use super::handlers::{
    generate_recommendations, get_recommendation, health, list_providers, list_recommendations,
    RecommendationAppState,
};

/// Create the recommendation router with all endpoints
///
/// The resource endpoints are served both at the root and under `/api`.
///
/// # Endpoints
///
/// - `POST /recommendations` - Generate and store a recommendation set
/// - `GET /recommendations` - List stored sets, oldest first
/// - `GET /recommendations/:id` - Get a stored set
/// - `GET /providers` - Provider names and availability
/// - `GET /api/health` - Liveness check
pub fn recommendation_router() -> Router<RecommendationAppState> {
    Router::new()
        .merge(resource_routes())
        .nest("/api", resource_routes().route("/health", get(health)))
}

fn resource_routes() -> Router<RecommendationAppState> {
    Router::new()
        .route(
            "/recommendations",
            get(list_recommendations).post(generate_recommendations),
        )
        .route("/recommendations/:id", get(get_recommendation))
        .route("/providers", get(list_providers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockRecommendationProvider;
    use crate::adapters::storage::InMemoryRecommendationStore;
    use crate::adapters::validation::JsonToolValidator;
    use crate::application::handlers::recommendation::{RecommendationOrchestrator, RetryPolicy};
    use crate::ports::{ProviderError, RecommendationProvider};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(providers: Vec<MockRecommendationProvider>) -> Router {
        let providers: Vec<Arc<dyn RecommendationProvider>> = providers
            .into_iter()
            .map(|p| Arc::new(p) as Arc<dyn RecommendationProvider>)
            .collect();
        let orchestrator = RecommendationOrchestrator::new(providers, Arc::new(JsonToolValidator::new()))
            .with_retry_policy(RetryPolicy::default().with_backoff(Duration::ZERO));
        let state = RecommendationAppState::new(
            Arc::new(orchestrator),
            Arc::new(InMemoryRecommendationStore::new()),
        );
        recommendation_router().with_state(state)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/recommendations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn post_then_get_round_trips() {
        let app = app(vec![MockRecommendationProvider::new("Gemini")]);

        let response = app
            .clone()
            .oneshot(post_json(r#"{"user_input": "I own a small bakery"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert_eq!(created["tools"].as_array().unwrap().len(), 9);
        assert_eq!(created["used_provider"], "Gemini");

        let id = created["id"].as_str().unwrap();
        let response = app
            .oneshot(get_request(&format!("/api/recommendations/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = json_body(response).await;
        assert_eq!(fetched["tools"], created["tools"]);
    }

    #[tokio::test]
    async fn blank_input_is_bad_request_without_provider_calls() {
        let provider = MockRecommendationProvider::new("Gemini");
        let app = app(vec![provider.clone()]);

        let response = app
            .oneshot(post_json(r#"{"user_input": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = app(vec![MockRecommendationProvider::new("Gemini")]);

        let response = app.clone().oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(post_json(r#"{"input": "x"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn provider_failure_is_generic_internal_error() {
        let provider = MockRecommendationProvider::new("Gemini")
            .with_errors(ProviderError::RateLimited("secret upstream detail".to_string()), 3);
        let app = app(vec![provider]);

        let response = app
            .oneshot(post_json(r#"{"user_input": "a bakery"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("secret upstream detail"));
    }

    #[tokio::test]
    async fn no_providers_is_internal_error() {
        let app = app(vec![MockRecommendationProvider::unavailable("Gemini")]);

        let response = app
            .oneshot(post_json(r#"{"user_input": "a bakery"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_not_found() {
        let app = app(vec![]);
        let response = app
            .clone()
            .oneshot(get_request("/api/recommendations/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["code"], "NOT_FOUND");

        let response = app.oneshot(get_request("/recommendations/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_paths_serve_the_same_resources() {
        let app = app(vec![MockRecommendationProvider::new("Gemini")]);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommendations")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"user_input": "a bakery"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        let id = created["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(get_request(&format!("/recommendations/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["tools"], created["tools"]);

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/recommendations/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_request("/recommendations")).await.unwrap();
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

        let response = app.oneshot(get_request("/providers")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["count"], 1);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let app = app(vec![]);
        let response = app
            .oneshot(get_request(&format!(
                "/api/recommendations/{}",
                uuid::Uuid::new_v4()
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn providers_reports_availability_and_count() {
        let app = app(vec![
            MockRecommendationProvider::new("Gemini"),
            MockRecommendationProvider::unavailable("OpenAI"),
        ]);

        let response = app.oneshot(get_request("/api/providers")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["providers"][0]["name"], "Gemini");
        assert_eq!(body["providers"][0]["available"], true);
        assert_eq!(body["providers"][1]["available"], false);
    }

    #[tokio::test]
    async fn list_returns_history_oldest_first() {
        let app = app(vec![MockRecommendationProvider::new("Gemini")]);
        for input in ["first", "second"] {
            let body = format!(r#"{{"user_input": "{}"}}"#, input);
            let response = app.clone().oneshot(post_json(&body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(get_request("/api/recommendations")).await.unwrap();
        let body = json_body(response).await;
        let inputs: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|set| set["user_input"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(inputs, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app(vec![]);
        let response = app.oneshot(get_request("/api/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "OK");
    }
}
