//! AI Provider Adapters.
//!
//! Implementations of the RecommendationProvider port for various LLM backends.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini with JSON output mode
//! - `OpenAIProvider` - OpenAI-compatible chat completions (OpenAI, OpenRouter, xAI)
//! - `AnthropicProvider` - Anthropic Claude via the Messages API
//! - `MockRecommendationProvider` - Configurable mock for testing

mod anthropic_provider;
mod gemini_provider;
pub mod json_payload;
mod mock_provider;
mod openai_provider;
mod transport;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockRecommendationProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
