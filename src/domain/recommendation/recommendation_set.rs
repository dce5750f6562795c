//! Recommendation Set - the accepted result of one orchestration run.

use serde::{Deserialize, Serialize};

use super::tool_record::ToolRecord;
use crate::domain::foundation::{RecommendationId, Timestamp};

/// Data needed to persist a new recommendation set.
///
/// The store assigns the id and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecommendationSet {
    pub user_input: String,
    pub tools: Vec<ToolRecord>,
    pub used_provider: Option<String>,
}

impl NewRecommendationSet {
    pub fn new(user_input: impl Into<String>, tools: Vec<ToolRecord>) -> Self {
        Self {
            user_input: user_input.into(),
            tools,
            used_provider: None,
        }
    }

    /// Records the provider that produced the tools.
    pub fn with_used_provider(mut self, provider: impl Into<String>) -> Self {
        self.used_provider = Some(provider.into());
        self
    }

    /// Stamps the set with a fresh id and the current time.
    pub fn into_recommendation_set(self) -> RecommendationSet {
        RecommendationSet {
            id: RecommendationId::new(),
            user_input: self.user_input,
            tools: self.tools,
            created_at: Timestamp::now(),
            used_provider: self.used_provider,
        }
    }
}

/// Immutable, persisted set of recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    id: RecommendationId,
    user_input: String,
    tools: Vec<ToolRecord>,
    created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    used_provider: Option<String>,
}

impl RecommendationSet {
    pub fn id(&self) -> RecommendationId {
        self.id
    }

    /// The business description exactly as the user submitted it.
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn used_provider(&self) -> Option<&str> {
        self.used_provider.as_deref()
    }
}
