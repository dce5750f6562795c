//! Foundation module - Shared domain primitives.
//!
//! Identifiers and time values used across the recommendation domain.

mod ids;
mod timestamp;

pub use ids::RecommendationId;
pub use timestamp::Timestamp;
