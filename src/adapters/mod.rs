//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM provider clients (Gemini, OpenAI-compatible, Anthropic) and a mock
//! - `validation` - strict Tool Record schema validation
//! - `storage` - recommendation set persistence (in-memory, YAML files)
//! - `http` - REST endpoints

pub mod ai;
pub mod http;
pub mod storage;
pub mod validation;

pub use ai::{
    AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider, MockRecommendationProvider,
    OpenAIConfig, OpenAIProvider,
};
pub use storage::{FileRecommendationStore, InMemoryRecommendationStore};
pub use validation::JsonToolValidator;
