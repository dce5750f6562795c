//! Tool Validator Port - strict schema check of provider payloads.
//!
//! Adapters keep JSON location permissive; this port keeps validation strict.
//! It only checks per-item shape. Aggregate counts are the orchestrator's job.

use serde_json::Value;
use thiserror::Error;

use crate::domain::recommendation::ToolRecord;

/// Port for turning a raw provider payload into Tool Records.
pub trait ToolValidator: Send + Sync {
    /// Validates `raw` as an array of tool objects.
    ///
    /// Fails on the first element that is missing a required field, has the
    /// wrong type, an empty required string, or a value outside a closed enum.
    fn validate(&self, raw: &Value) -> Result<Vec<ToolRecord>, ToolValidationError>;
}

/// Syntactically parseable but semantically malformed provider data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolValidationError {
    #[error("expected an array of tools, got {actual}")]
    NotAnArray { actual: String },

    #[error("{path} must be an object, got {actual}")]
    NotAnObject { path: String, actual: String },

    #[error("missing required field: {path}")]
    MissingField { path: String },

    #[error("invalid type for {path}: expected {expected}, got {actual}")]
    InvalidType {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("{path} must not be empty")]
    EmptyField { path: String },

    #[error("invalid value for {path}: '{value}' is not one of {allowed}")]
    InvalidEnum {
        path: String,
        value: String,
        allowed: String,
    },
}
