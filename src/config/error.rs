//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout (must be 1..=600 seconds)")]
    InvalidTimeout,

    #[error("Invalid provider call timeout (must be at least 1 second)")]
    InvalidProviderTimeout,

    #[error("max_retries must be at least 1")]
    InvalidMaxRetries,

    #[error("Storage data_dir must not be empty")]
    EmptyDataDir,
}
