//! Recommendation command and query handlers.

mod generate_recommendations;
mod get_recommendation;
mod list_providers;
mod list_recommendations;
mod orchestrator;

pub use generate_recommendations::{
    GenerateRecommendationsCommand, GenerateRecommendationsError, GenerateRecommendationsHandler,
};
pub use get_recommendation::{
    GetRecommendationError, GetRecommendationHandler, GetRecommendationQuery,
};
pub use list_providers::{ListProvidersHandler, ProviderListing};
pub use list_recommendations::ListRecommendationsHandler;
pub use orchestrator::{
    AttemptError, OrchestratorError, RecommendationOrchestrator, RecommendationOutcome,
    RecommendationRequest, RetryPolicy,
};
