//! Storage Adapters
//!
//! Implementations of the RecommendationStore port.

mod file_recommendation_store;
mod in_memory_recommendation_store;

pub use file_recommendation_store::FileRecommendationStore;
pub use in_memory_recommendation_store::InMemoryRecommendationStore;
