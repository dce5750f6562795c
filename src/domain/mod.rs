//! Domain layer containing business types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps)
//! - `recommendation` - Tool records, recommendation sets, count policy, prompts

pub mod foundation;
pub mod recommendation;
