//! GenerateRecommendationsHandler - Run the orchestrator and persist the result

use futures::future;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use super::orchestrator::{OrchestratorError, RecommendationOrchestrator, RecommendationRequest};
use crate::domain::recommendation::{NewRecommendationSet, RecommendationSet};
use crate::ports::{RecommendationStore, StoreError};

/// Command to generate a new recommendation set
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsCommand {
    pub user_input: String,
    pub preferred_provider: Option<String>,
}

/// Error type for generating recommendations
#[derive(Debug, Clone, Error)]
pub enum GenerateRecommendationsError {
    /// Input was empty or whitespace only
    #[error("business description must not be empty")]
    EmptyInput,

    #[error("no recommendation provider is configured")]
    NoProviderAvailable,

    /// Every provider exhausted its attempts
    #[error("all providers failed after {attempts} attempts: {last_error}")]
    AllProvidersFailed { attempts: u32, last_error: String },

    #[error("request cancelled")]
    Cancelled,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<OrchestratorError> for GenerateRecommendationsError {
    fn from(err: OrchestratorError) -> Self {
        match err {
            OrchestratorError::NoProviderAvailable => Self::NoProviderAvailable,
            OrchestratorError::AllProvidersFailed {
                attempts,
                last_error,
            } => Self::AllProvidersFailed {
                attempts,
                last_error: last_error.to_string(),
            },
            OrchestratorError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<StoreError> for GenerateRecommendationsError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Handler for generating recommendation sets
pub struct GenerateRecommendationsHandler {
    orchestrator: Arc<RecommendationOrchestrator>,
    store: Arc<dyn RecommendationStore>,
}

impl GenerateRecommendationsHandler {
    pub fn new(
        orchestrator: Arc<RecommendationOrchestrator>,
        store: Arc<dyn RecommendationStore>,
    ) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateRecommendationsCommand,
    ) -> Result<RecommendationSet, GenerateRecommendationsError> {
        self.handle_until(cmd, future::pending()).await
    }

    /// Like `handle`, but stops with `Cancelled` once `cancel` resolves.
    ///
    /// Nothing is persisted for a cancelled run.
    pub async fn handle_until<C>(
        &self,
        cmd: GenerateRecommendationsCommand,
        cancel: C,
    ) -> Result<RecommendationSet, GenerateRecommendationsError>
    where
        C: Future<Output = ()> + Send,
    {
        // 1. Reject blank input before spending any provider calls
        if cmd.user_input.trim().is_empty() {
            return Err(GenerateRecommendationsError::EmptyInput);
        }

        // 2. Run providers until one yields a conforming list
        let request = RecommendationRequest {
            user_input: cmd.user_input.clone(),
            preferred_provider: cmd.preferred_provider,
        };
        let outcome = self.orchestrator.recommend_until(request, cancel).await?;

        // 3. Persist, keeping the input exactly as submitted
        let new_set = NewRecommendationSet::new(cmd.user_input, outcome.tools)
            .with_used_provider(outcome.used_provider);
        let set = self.store.create(new_set).await?;
        tracing::debug!(id = %set.id(), "recommendation set stored");

        Ok(set)
    }
}
