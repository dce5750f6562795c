//! HTTP handlers for recommendation endpoints
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::recommendation::{
    GenerateRecommendationsCommand, GenerateRecommendationsError, GenerateRecommendationsHandler,
    GetRecommendationError, GetRecommendationHandler, GetRecommendationQuery,
    ListProvidersHandler, ListRecommendationsHandler, RecommendationOrchestrator,
};
use crate::domain::foundation::RecommendationId;
use crate::ports::RecommendationStore;

use super::dto::{
    ErrorResponse, GenerateRecommendationsRequest, HealthResponse, ProvidersResponse,
    RecommendationSetResponse,
};

/// Message shown for any failed generation; provider details stay in the logs.
const GENERATION_FAILED: &str = "Failed to generate recommendations. Please try again.";

type ErrorReply = (StatusCode, Json<ErrorResponse>);

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct RecommendationAppState {
    pub orchestrator: Arc<RecommendationOrchestrator>,
    pub store: Arc<dyn RecommendationStore>,
}

impl RecommendationAppState {
    pub fn new(
        orchestrator: Arc<RecommendationOrchestrator>,
        store: Arc<dyn RecommendationStore>,
    ) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    pub fn generate_recommendations_handler(&self) -> GenerateRecommendationsHandler {
        GenerateRecommendationsHandler::new(self.orchestrator.clone(), self.store.clone())
    }

    pub fn get_recommendation_handler(&self) -> GetRecommendationHandler {
        GetRecommendationHandler::new(self.store.clone())
    }

    pub fn list_recommendations_handler(&self) -> ListRecommendationsHandler {
        ListRecommendationsHandler::new(self.store.clone())
    }

    pub fn list_providers_handler(&self) -> ListProvidersHandler {
        ListProvidersHandler::new(self.orchestrator.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Generate and store a recommendation set
///
/// POST /recommendations (also under /api)
pub async fn generate_recommendations(
    State(app_state): State<RecommendationAppState>,
    payload: Result<Json<GenerateRecommendationsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let Json(req) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(rejection.body_text())),
        )
    })?;

    let cmd = GenerateRecommendationsCommand {
        user_input: req.user_input,
        preferred_provider: req.preferred_provider,
    };

    let handler = app_state.generate_recommendations_handler();
    let set = handler.handle(cmd).await.map_err(|e| match e {
        GenerateRecommendationsError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("user_input must not be empty")),
        ),
        GenerateRecommendationsError::NoProviderAvailable
        | GenerateRecommendationsError::AllProvidersFailed { .. }
        | GenerateRecommendationsError::Cancelled => {
            tracing::error!(error = %e, "recommendation generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(GENERATION_FAILED)),
            )
        }
        GenerateRecommendationsError::Storage(msg) => {
            tracing::error!(error = %msg, "failed to store recommendation set");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Failed to save recommendations")),
            )
        }
    })?;

    Ok::<_, ErrorReply>((StatusCode::OK, Json(RecommendationSetResponse::from(set))))
}

/// Get a stored recommendation set
///
/// GET /recommendations/:id (also under /api)
pub async fn get_recommendation(
    State(app_state): State<RecommendationAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    // No set can exist under an id that is not a UUID.
    let recommendation_id = RecommendationId::from_str(&id).map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Recommendation", &id)),
        )
    })?;

    let handler = app_state.get_recommendation_handler();
    let set = handler
        .handle(GetRecommendationQuery {
            id: recommendation_id,
        })
        .await
        .map_err(|e| match e {
            GetRecommendationError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Recommendation", &id)),
            ),
            GetRecommendationError::Storage(msg) => {
                tracing::error!(error = %msg, "failed to read recommendation set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal("Failed to load recommendations")),
                )
            }
        })?;

    Ok::<_, ErrorReply>(Json(RecommendationSetResponse::from(set)))
}

/// List stored recommendation sets, oldest first
///
/// GET /recommendations (also under /api)
pub async fn list_recommendations(
    State(app_state): State<RecommendationAppState>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let handler = app_state.list_recommendations_handler();
    let sets = handler.handle().await.map_err(|e| {
        tracing::error!(error = %e, "failed to list recommendation sets");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal("Failed to load recommendations")),
        )
    })?;

    let body: Vec<RecommendationSetResponse> =
        sets.into_iter().map(RecommendationSetResponse::from).collect();
    Ok::<_, ErrorReply>(Json(body))
}

/// Registered providers and their availability
///
/// GET /providers (also under /api)
pub async fn list_providers(State(app_state): State<RecommendationAppState>) -> impl IntoResponse {
    let listing = app_state.list_providers_handler().handle();
    Json(ProvidersResponse::from(listing))
}

/// Liveness check
///
/// GET /api/health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}
