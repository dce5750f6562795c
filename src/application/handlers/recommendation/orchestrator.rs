//! RecommendationOrchestrator - retry and fallback across LLM providers.
//!
//! Providers are tried one at a time. Each gets up to `max_retries` attempts,
//! with `backoff` between attempts of the same provider; when it is exhausted
//! the next selected provider starts with a fresh counter. An attempt
//! succeeds only if the payload validates and satisfies the policy.
//!
//! The returned future holds no locks or spawned tasks, so dropping it
//! abandons the remaining attempts.

use futures::future;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};

use crate::domain::recommendation::{PolicyMismatch, RecommendationPolicy, ToolRecord};
use crate::ports::{
    ProviderError, ProviderStatus, RecommendationProvider, ToolValidationError, ToolValidator,
};

/// Attempt bounds and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per provider, including the first. Values below 1 count as 1.
    pub max_retries: u32,
    /// Pause between attempts of the same provider.
    pub backoff: Duration,
    /// Upper bound on a single `generate` call.
    pub call_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Duration::from_secs(1),
            call_timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    fn attempts_per_provider(&self) -> u32 {
        self.max_retries.max(1)
    }
}

/// One recommendation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub user_input: String,
    /// Case-insensitive substring of a provider name to try first.
    pub preferred_provider: Option<String>,
}

impl RecommendationRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            preferred_provider: None,
        }
    }

    pub fn with_preferred_provider(mut self, hint: impl Into<String>) -> Self {
        self.preferred_provider = Some(hint.into());
        self
    }
}

/// A validated, policy-conforming result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationOutcome {
    pub tools: Vec<ToolRecord>,
    pub used_provider: String,
}

/// Why a single attempt failed. Every variant is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("invalid payload: {0}")]
    Validation(#[from] ToolValidationError),

    #[error("policy mismatch: {0}")]
    Policy(#[from] PolicyMismatch),
}

/// Fatal outcomes of a recommendation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("no recommendation provider is configured")]
    NoProviderAvailable,

    #[error("all providers failed after {attempts} attempts; last error: {last_error}")]
    AllProvidersFailed {
        attempts: u32,
        last_error: AttemptError,
    },

    #[error("recommendation request cancelled")]
    Cancelled,
}

/// Dispatches recommendation requests across the provider registry.
pub struct RecommendationOrchestrator {
    providers: Vec<Arc<dyn RecommendationProvider>>,
    validator: Arc<dyn ToolValidator>,
    policy: RecommendationPolicy,
    retry: RetryPolicy,
}

impl RecommendationOrchestrator {
    /// Creates an orchestrator over `providers`, in registration order.
    pub fn new(
        providers: Vec<Arc<dyn RecommendationProvider>>,
        validator: Arc<dyn ToolValidator>,
    ) -> Self {
        Self {
            providers,
            validator,
            policy: RecommendationPolicy::STANDARD,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RecommendationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn policy(&self) -> RecommendationPolicy {
        self.policy
    }

    /// Name and availability of every registered provider, in registration order.
    pub fn statuses(&self) -> Vec<ProviderStatus> {
        self.providers
            .iter()
            .map(|provider| ProviderStatus::of(provider.as_ref()))
            .collect()
    }

    /// Runs the request to completion or fatal failure.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationOutcome, OrchestratorError> {
        self.recommend_until(request, future::pending()).await
    }

    /// Like [`recommend`](Self::recommend), but gives up with `Cancelled`
    /// as soon as `cancel` resolves.
    pub async fn recommend_until<C>(
        &self,
        request: RecommendationRequest,
        cancel: C,
    ) -> Result<RecommendationOutcome, OrchestratorError>
    where
        C: Future<Output = ()> + Send,
    {
        tokio::select! {
            result = self.run(&request) => result,
            _ = cancel => {
                tracing::info!("recommendation request cancelled");
                Err(OrchestratorError::Cancelled)
            }
        }
    }

    /// Available providers in attempt order, preferred one first.
    fn select(&self, preferred: Option<&str>) -> Vec<Arc<dyn RecommendationProvider>> {
        let mut selected: Vec<_> = self
            .providers
            .iter()
            .filter(|provider| provider.is_available())
            .cloned()
            .collect();

        let hint = preferred
            .map(|hint| hint.trim().to_lowercase())
            .filter(|hint| !hint.is_empty());
        if let Some(hint) = hint {
            if let Some(pos) = selected
                .iter()
                .position(|provider| provider.name().to_lowercase().contains(&hint))
            {
                let provider = selected.remove(pos);
                selected.insert(0, provider);
            }
        }

        selected
    }

    async fn run(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationOutcome, OrchestratorError> {
        let selected = self.select(request.preferred_provider.as_deref());
        if selected.is_empty() {
            tracing::warn!("no recommendation provider available");
            return Err(OrchestratorError::NoProviderAvailable);
        }

        let max_attempts = self.retry.attempts_per_provider();
        let mut total_attempts = 0;
        let mut last_error = None;

        for (index, provider) in selected.iter().enumerate() {
            if index > 0 {
                tracing::info!(provider = provider.name(), "falling back to next provider");
            }

            for attempt in 1..=max_attempts {
                if attempt > 1 && !self.retry.backoff.is_zero() {
                    sleep(self.retry.backoff).await;
                }
                total_attempts += 1;

                match self.attempt(provider.as_ref(), &request.user_input).await {
                    Ok(tools) => {
                        tracing::info!(
                            provider = provider.name(),
                            attempt,
                            tools = tools.len(),
                            "recommendations generated"
                        );
                        return Ok(RecommendationOutcome {
                            tools,
                            used_provider: provider.name().to_string(),
                        });
                    }
                    Err(err) => {
                        tracing::warn!(
                            provider = provider.name(),
                            attempt,
                            max_attempts,
                            error = %err,
                            "recommendation attempt failed"
                        );
                        last_error = Some(err);
                    }
                }
            }
        }

        match last_error {
            Some(last_error) => {
                tracing::error!(
                    attempts = total_attempts,
                    error = %last_error,
                    "all recommendation providers failed"
                );
                Err(OrchestratorError::AllProvidersFailed {
                    attempts: total_attempts,
                    last_error,
                })
            }
            None => Err(OrchestratorError::NoProviderAvailable),
        }
    }

    /// One bounded call plus validation and policy check.
    async fn attempt(
        &self,
        provider: &dyn RecommendationProvider,
        user_input: &str,
    ) -> Result<Vec<ToolRecord>, AttemptError> {
        let payload = match timeout(self.retry.call_timeout, provider.generate(user_input)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(ProviderError::Timeout {
                    timeout_secs: self.retry.call_timeout.as_secs(),
                }
                .into())
            }
        };

        let tools = self.validator.validate(&payload)?;
        self.policy.check(&tools)?;
        Ok(tools)
    }
}
