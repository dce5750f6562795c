//! Recommendation Provider Port - Interface for LLM backends.
//!
//! Each backend (Gemini, OpenAI, Anthropic, ...) wraps its own request and
//! response idiosyncrasies behind this uniform contract so the orchestrator
//! can dispatch to any of them.
//!
//! # Contract
//!
//! - `is_available` is a pure configuration check: true iff the adapter's
//!   credential is present. It never touches the network.
//! - `generate` performs one round trip and returns the JSON payload with one
//!   level of object wrapping already removed. It never returns a partially
//!   parsed or truncated list; any failure is a [`ProviderError`].
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl RecommendationProvider for FixedProvider {
//!     fn name(&self) -> &str { "Fixed" }
//!     fn is_available(&self) -> bool { true }
//!     async fn generate(&self, _input: &str) -> Result<serde_json::Value, ProviderError> {
//!         Ok(serde_json::json!([]))
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Port for LLM-backed recommendation generation.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Display name, used for preference matching and reported as `used_provider`.
    fn name(&self) -> &str;

    /// True iff the required credential is configured.
    fn is_available(&self) -> bool;

    /// Asks the backend for recommendations for `user_input`.
    ///
    /// Returns the raw (unvalidated) payload, normally a JSON array.
    async fn generate(&self, user_input: &str) -> Result<Value, ProviderError>;
}

/// Configuration reflection of one registered provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub available: bool,
}

impl ProviderStatus {
    pub fn of(provider: &dyn RecommendationProvider) -> Self {
        Self {
            name: provider.name().to_string(),
            available: provider.is_available(),
        }
    }
}

/// Transport, auth and response failures from a specific backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no credential configured.
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Provider returned a server error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// The call did not finish within the per-call timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The provider answered with no text.
    #[error("empty response")]
    EmptyResponse,

    /// No JSON payload could be located in the response.
    #[error("unparsable response: {0}")]
    Unparsable(String),
}

impl ProviderError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an unparsable-response error.
    pub fn unparsable(message: impl Into<String>) -> Self {
        Self::Unparsable(message.into())
    }
}
