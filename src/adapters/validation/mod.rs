//! Validation adapters.
//!
//! - `JsonToolValidator` - strict Tool Record schema validation of provider payloads

mod json_tool_validator;

pub use json_tool_validator::JsonToolValidator;
