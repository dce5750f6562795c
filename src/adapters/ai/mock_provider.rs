//! Mock Recommendation Provider for testing.
//!
//! Provides a configurable implementation of the RecommendationProvider port,
//! allowing tests to run without calling real LLM APIs.
//!
//! # Features
//!
//! - Pre-configured payloads, raw model text, or errors, consumed in order
//! - Simulated delays for timeout and cancellation testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockRecommendationProvider::new("Primary")
//!     .with_error(ProviderError::RateLimited("busy".into()))
//!     .with_payload(MockRecommendationProvider::standard_payload());
//!
//! assert!(provider.generate("a bakery").await.is_err());
//! assert!(provider.generate("a bakery").await.is_ok());
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use super::json_payload;
use crate::ports::{ProviderError, RecommendationProvider};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this payload as-is.
    Payload(Value),
    /// Treat this as raw model output and extract the payload from it.
    Text(String),
    /// Fail with this error.
    Error(ProviderError),
}

/// Mock provider for testing.
#[derive(Debug, Clone)]
pub struct MockRecommendationProvider {
    name: String,
    available: bool,
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// User inputs received, in order.
    calls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockRecommendationProvider {
    /// Creates an available mock that returns the standard payload by default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock with no credential configured.
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            available: false,
            ..Self::new(name)
        }
    }

    /// Queues a payload.
    pub fn with_payload(self, payload: Value) -> Self {
        self.push(MockResponse::Payload(payload))
    }

    /// Queues raw model text.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(MockResponse::Text(text.into()))
    }

    /// Queues an error.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Queues the same error `times` times.
    pub fn with_errors(self, error: ProviderError, times: usize) -> Self {
        (0..times).fold(self, |mock, _| mock.with_error(error.clone()))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn push(self, response: MockResponse) -> Self {
        lock(&self.responses).push_back(response);
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded user inputs.
    pub fn get_calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Gets the next response or the standard payload.
    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Payload(Self::standard_payload()))
    }

    /// A well-formed payload of five free/freemium tools followed by four paid ones.
    pub fn standard_payload() -> Value {
        let free = [
            ("Canva", "Freemium", "tool"),
            ("ChatGPT", "Freemium", "agent"),
            ("Google Analytics", "Free", "tool"),
            ("Mailchimp", "Freemium", "tool"),
            ("Notion AI", "Freemium", "tool"),
        ];
        let paid = [
            ("Jasper", "Paid", "tool"),
            ("Square AI", "Paid", "tool"),
            ("Toast POS", "Paid", "tool"),
            ("Synthesia", "Paid", "agent"),
        ];

        Value::Array(
            free.iter()
                .chain(paid.iter())
                .map(|(name, pricing, kind)| {
                    json!({
                        "tool_name": name,
                        "purpose": format!("{} for small businesses", name),
                        "pros": ["Easy to use", "Well documented"],
                        "cons": ["Learning curve"],
                        "pricing": pricing,
                        "why_fit": format!("{} covers a common need", name),
                        "link": format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
                        "type": kind,
                    })
                })
                .collect(),
        )
    }
}

#[async_trait]
impl RecommendationProvider for MockRecommendationProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn generate(&self, user_input: &str) -> Result<Value, ProviderError> {
        lock(&self.calls).push(user_input.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Payload(value) => Ok(value),
            MockResponse::Text(text) => json_payload::extract(&text),
            MockResponse::Error(err) => Err(err),
        }
    }
}
