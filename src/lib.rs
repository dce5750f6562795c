//! Tool Scout - AI tool recommendations for small businesses
//!
//! Turns a free-text business description into a fixed-shape list of AI tool
//! and agent recommendations, asking several LLM providers in turn until one
//! returns a list that passes strict validation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

use std::sync::Arc;

use axum::Router;

use crate::adapters::http::{app_router, RecommendationAppState};
use crate::adapters::validation::JsonToolValidator;
use crate::application::RecommendationOrchestrator;
use crate::config::{AppConfig, ValidationError};

/// Wires providers, validator and store from configuration.
pub fn build_state(config: &AppConfig) -> RecommendationAppState {
    let orchestrator = RecommendationOrchestrator::new(
        config.ai.build_providers(),
        Arc::new(JsonToolValidator::new()),
    )
    .with_retry_policy(config.ai.retry_policy());

    RecommendationAppState::new(Arc::new(orchestrator), config.storage.build_store())
}

/// Builds the HTTP application for a validated configuration.
pub fn build_app(config: &AppConfig) -> Result<Router, ValidationError> {
    config.validate()?;
    Ok(app_router(
        build_state(config),
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    ))
}
