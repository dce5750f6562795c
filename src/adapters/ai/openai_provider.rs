//! OpenAI-compatible Provider - chat completions over the OpenAI wire format.
//!
//! OpenAI itself, OpenRouter and xAI all speak the same `/chat/completions`
//! protocol, so one adapter serves all three. They differ in display name,
//! base URL, model, and whether JSON mode is requested.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::openai(Some(api_key))
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(20));
//!
//! let provider = OpenAIProvider::new(config);
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

/// Configuration for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication. Absent means the provider is unavailable.
    api_key: Option<Secret<String>>,
    /// Display name reported as `used_provider`.
    pub name: String,
    /// Model to use (e.g., "gpt-4o").
    pub model: String,
    /// Base URL for the API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Whether to ask for `response_format: json_object`.
    pub json_mode: bool,
    /// Shape the prompt asks for. JSON mode always gets `WrappedObject`.
    pub prompt_style: PromptStyle,
}

impl OpenAIConfig {
    /// Creates a configuration with the given name and defaults for OpenAI.
    pub fn new(name: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(Secret::new),
            name: name.into(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            json_mode: true,
            prompt_style: PromptStyle::WrappedObject,
        }
    }

    /// OpenAI's own API.
    pub fn openai(api_key: Option<String>) -> Self {
        Self::new("OpenAI", api_key)
    }

    /// DeepSeek R1 routed through OpenRouter. The reasoning model does not
    /// accept JSON mode.
    pub fn openrouter_deepseek(api_key: Option<String>) -> Self {
        Self::new("Deepseek R1", api_key)
            .with_base_url("https://openrouter.ai/api/v1")
            .with_model("deepseek/deepseek-r1")
            .with_json_mode(false)
    }

    /// xAI's Grok.
    pub fn xai(api_key: Option<String>) -> Self {
        Self::new("xAI Grok", api_key)
            .with_base_url("https://api.x.ai/v1")
            .with_model("grok-2-1212")
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

    /// Enables or disables JSON mode.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    /// Sets the prompt shape used when JSON mode is off.
    pub fn with_prompt_style(mut self, style: PromptStyle) -> Self {
        self.prompt_style = style;
        self
    }

    /// Exposes the API key, treating an empty key as absent.
    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Provider speaking the OpenAI chat completions protocol.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
    prompt: RecommendationPrompt,
}

impl OpenAIProvider {
    /// Creates a provider with the given configuration and the standard policy.
    pub fn new(config: OpenAIConfig) -> Self {
        Self::with_policy(config, RecommendationPolicy::STANDARD)
    }

    /// Creates a provider whose prompt states `policy`.
    pub fn with_policy(config: OpenAIConfig, policy: RecommendationPolicy) -> Self {
        // JSON mode only allows an object at the top level.
        let style = if config.json_mode {
            PromptStyle::WrappedObject
        } else {
            config.prompt_style
        };
        let client = transport::build_client(config.timeout);

        Self {
            prompt: RecommendationPrompt::new(policy, style),
            config,
            client,
        }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Converts a user input to the chat completions format.
    fn to_chat_request(&self, user_input: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.prompt.system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.prompt.user_prompt(user_input),
                },
            ],
            response_format: self.config.json_mode.then(|| ResponseFormat {
                kind: "json_object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl RecommendationProvider for OpenAIProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_available(&self) -> bool {
        self.config.api_key().is_some()
    }

    async fn generate(&self, user_input: &str) -> Result<Value, ProviderError> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| ProviderError::NotConfigured(self.config.name.clone()))?;

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&self.to_chat_request(user_input))
            .send()
            .await
            .map_err(|e| transport::send_error(e, self.config.timeout))?;
        let response = transport::check_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::unparsable(format!("Failed to parse response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        json_payload::extract(&content)
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
