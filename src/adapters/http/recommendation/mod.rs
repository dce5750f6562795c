//! Recommendation HTTP Adapter
//!
//! REST endpoints for generating, retrieving and listing recommendation sets,
//! plus provider reflection and a liveness check.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, GenerateRecommendationsRequest, HealthResponse, ProvidersResponse,
    RecommendationSetResponse,
};
pub use handlers::RecommendationAppState;
pub use routes::recommendation_router;
