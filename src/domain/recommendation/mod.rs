//! Recommendation domain - tool records, sets, policy and prompts.

mod policy;
mod prompt;
mod recommendation_set;
mod tool_record;

pub use policy::{PolicyMismatch, RecommendationPolicy};
pub use prompt::{PromptStyle, RecommendationPrompt};
pub use recommendation_set::{NewRecommendationSet, RecommendationSet};
pub use tool_record::{PricingTier, ToolKind, ToolRecord};
