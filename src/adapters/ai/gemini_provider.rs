//! Gemini Provider - Google's Generative Language API.
//!
//! Requests `application/json` output so the model returns a bare array.
//! The prompt carries the focus-area list and per-category examples.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::{json_payload, transport};
use crate::domain::recommendation::{PromptStyle, RecommendationPolicy, RecommendationPrompt};
use crate::ports::{ProviderError, RecommendationProvider};

const PROVIDER_NAME: &str = "Gemini";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Option<Secret<String>>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(Secret::new),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
    prompt: RecommendationPrompt,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_policy(config, RecommendationPolicy::STANDARD)
    }

    pub fn with_policy(config: GeminiConfig, policy: RecommendationPolicy) -> Self {
        let client = transport::build_client(config.timeout);
        Self {
            prompt: RecommendationPrompt::new(policy, PromptStyle::BareArray).with_category_hints(),
            config,
            client,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(&self, user_input: &str) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(self.prompt.system_prompt()),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(self.prompt.user_prompt(user_input)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[async_trait]
impl RecommendationProvider for GeminiProvider {
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
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&self.to_gemini_request(user_input))
            .send()
            .await
            .map_err(|e| transport::send_error(e, self.config.timeout))?;
        let response = transport::check_status(response).await?;

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::unparsable(format!("Failed to parse response: {}", e)))?;

        json_payload::extract(&body.text())
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new(Some("g-key".to_string()))
            .with_model("gemini-1.5-pro")
            .with_base_url("http://localhost:9000/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), Some("g-key"));

        let provider = GeminiProvider::new(config);
        assert_eq!(
            provider.generate_url(),
            "http://localhost:9000/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn availability_tracks_key_presence() {
        assert!(GeminiProvider::new(GeminiConfig::new(Some("k".to_string()))).is_available());
        assert!(!GeminiProvider::new(GeminiConfig::new(None)).is_available());
    }

    #[tokio::test]
    async fn generate_without_key_is_not_configured() {
        let provider = GeminiProvider::new(GeminiConfig::new(None));
        let err = provider.generate("a bakery").await.unwrap_err();
        assert_eq!(err, ProviderError::NotConfigured("Gemini".to_string()));
    }

    #[test]
    fn request_asks_for_json_with_category_hints() {
        let provider = GeminiProvider::new(GeminiConfig::new(Some("k".to_string())));
        let json = serde_json::to_value(provider.to_gemini_request("a bakery")).unwrap();

        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("FOCUS AREAS"));
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert!(json["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("a bakery"));
    }

    #[test]
    fn response_text_reads_first_candidate() {
        let body: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"role": "model", "parts": [{"text": "[{\"a\""}, {"text": ": 1}]"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(body.text(), r#"[{"a": 1}]"#);
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let body: GeminiResponse = serde_json::from_str(r#"{"promptFeedback": {}}"#).unwrap();
        assert_eq!(
            json_payload::extract(&body.text()).unwrap_err(),
            ProviderError::EmptyResponse
        );
    }
}
