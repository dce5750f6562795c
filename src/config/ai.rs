//! AI provider configuration

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{
    AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider,
};
use crate::application::handlers::recommendation::RetryPolicy;
use crate::ports::RecommendationProvider;

/// AI provider configuration
///
/// Every key is optional. A provider without a key stays registered but
/// unavailable, so zero keys still yields a running service.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Google Gemini API key
    pub gemini_api_key: Option<String>,

    /// OpenRouter API key (used for DeepSeek R1)
    pub openrouter_api_key: Option<String>,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// xAI API key
    pub xai_api_key: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Attempts per provider, including the first
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Pause between attempts of the same provider, in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_backoff(Duration::from_millis(self.retry_backoff_ms))
            .with_call_timeout(self.timeout())
    }

    /// Number of providers with a non-empty key
    pub fn configured_count(&self) -> usize {
        [
            &self.gemini_api_key,
            &self.openrouter_api_key,
            &self.openai_api_key,
            &self.anthropic_api_key,
            &self.xai_api_key,
        ]
        .iter()
        .filter(|key| has_key(key))
        .count()
    }

    /// Builds the provider registry in its fixed registration order:
    /// Gemini, Deepseek R1, OpenAI, Anthropic, xAI Grok.
    pub fn build_providers(&self) -> Vec<Arc<dyn RecommendationProvider>> {
        let timeout = self.timeout();
        vec![
            Arc::new(GeminiProvider::new(
                GeminiConfig::new(self.gemini_api_key.clone()).with_timeout(timeout),
            )),
            Arc::new(OpenAIProvider::new(
                OpenAIConfig::openrouter_deepseek(self.openrouter_api_key.clone())
                    .with_timeout(timeout),
            )),
            Arc::new(OpenAIProvider::new(
                OpenAIConfig::openai(self.openai_api_key.clone()).with_timeout(timeout),
            )),
            Arc::new(AnthropicProvider::new(
                AnthropicConfig::new(self.anthropic_api_key.clone()).with_timeout(timeout),
            )),
            Arc::new(OpenAIProvider::new(
                OpenAIConfig::xai(self.xai_api_key.clone()).with_timeout(timeout),
            )),
        ]
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidProviderTimeout);
        }
        if self.max_retries == 0 {
            return Err(ValidationError::InvalidMaxRetries);
        }
        Ok(())
    }
}

fn has_key(key: &Option<String>) -> bool {
    key.as_ref().is_some_and(|k| !k.trim().is_empty())
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openrouter_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            xai_api_key: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    1000
}
