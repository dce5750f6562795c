//! Anthropic Provider - Claude via the Messages API.
//!
//! Claude has no JSON mode. It is asked for a bare array and frequently wraps
//! it in a markdown fence, which `json_payload::extract` strips.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(Some(api_key))
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_base_url("https://api.anthropic.com");
//!
//! let provider = AnthropicProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::{json_payload, transport};
use crate::domain::recommendation::{PromptStyle, RecommendationPolicy, RecommendationPrompt};
use crate::ports::{ProviderError, RecommendationProvider};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Display name of this provider.
const PROVIDER_NAME: &str = "Anthropic";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication. Absent means the provider is unavailable.
    api_key: Option<Secret<String>>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Output token ceiling; nine detailed records need room.
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(Secret::new),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 4000,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the output token ceiling.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
    prompt: RecommendationPrompt,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the standard policy.
    pub fn new(config: AnthropicConfig) -> Self {
        Self::with_policy(config, RecommendationPolicy::STANDARD)
    }

    /// Creates a provider whose prompt states `policy`.
    pub fn with_policy(config: AnthropicConfig, policy: RecommendationPolicy) -> Self {
        let client = transport::build_client(config.timeout);
        Self {
            prompt: RecommendationPrompt::new(policy, PromptStyle::BareArray),
            config,
            client,
        }
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts a user input to Anthropic's format.
    fn to_anthropic_request(&self, user_input: &str) -> AnthropicRequest {
        AnthropicRequest {
            model: self.config.model.clone(),
            system: self.prompt.system_prompt(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: self.prompt.user_prompt(user_input),
            }],
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl RecommendationProvider for AnthropicProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.config.api_key().is_some()
    }

    async fn generate(&self, user_input: &str) -> Result<Value, ProviderError> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| ProviderError::NotConfigured(PROVIDER_NAME.to_string()))?;

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&self.to_anthropic_request(user_input))
            .send()
            .await
            .map_err(|e| transport::send_error(e, self.config.timeout))?;
        let response = transport::check_status(response).await?;

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::unparsable(format!("Failed to parse response: {}", e)))?;

        json_payload::extract(&body.text())
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    system: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

impl AnthropicResponse {
    /// Concatenates all text blocks.
    fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}
