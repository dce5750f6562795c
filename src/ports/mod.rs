//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `RecommendationProvider` - LLM backend producing raw recommendations
//! - `ToolValidator` - strict per-item schema validation
//! - `RecommendationStore` - persistence of accepted recommendation sets

mod recommendation_provider;
mod recommendation_store;
mod tool_validator;

pub use recommendation_provider::{ProviderError, ProviderStatus, RecommendationProvider};
pub use recommendation_store::{RecommendationStore, StoreError};
pub use tool_validator::{ToolValidationError, ToolValidator};
