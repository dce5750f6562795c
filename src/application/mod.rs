//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer coordinates the provider registry, the validator and the store.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::recommendation::{
    GenerateRecommendationsCommand, GenerateRecommendationsError, GenerateRecommendationsHandler,
    GetRecommendationError, GetRecommendationHandler, GetRecommendationQuery,
    ListProvidersHandler, ListRecommendationsHandler, RecommendationOrchestrator, RetryPolicy,
};
