//! HTTP DTOs for recommendation endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::recommendation::ProviderListing;
use crate::domain::recommendation::{RecommendationSet, ToolRecord};
use crate::ports::ProviderStatus;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to generate recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRecommendationsRequest {
    #[serde(alias = "userInput")]
    pub user_input: String,
    #[serde(default, alias = "preferredProvider")]
    pub preferred_provider: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A stored recommendation set
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSetResponse {
    pub id: String,
    pub user_input: String,
    pub tools: Vec<ToolRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_provider: Option<String>,
    pub created_at: String,
}

impl From<RecommendationSet> for RecommendationSetResponse {
    fn from(set: RecommendationSet) -> Self {
        Self {
            id: set.id().to_string(),
            user_input: set.user_input().to_string(),
            used_provider: set.used_provider().map(str::to_string),
            created_at: set.created_at().as_datetime().to_rfc3339(),
            tools: set.tools().to_vec(),
        }
    }
}

/// Provider registry reflection
#[derive(Debug, Clone, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderStatus>,
    /// Number of providers that can currently be used.
    pub count: usize,
}

impl From<ProviderListing> for ProvidersResponse {
    fn from(listing: ProviderListing) -> Self {
        Self {
            providers: listing.providers,
            count: listing.available_count,
        }
    }
}

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Server is running".to_string(),
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
