//! Count and pricing-mix policy for a recommendation set.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::tool_record::ToolRecord;

/// Required total count and free/paid split of a recommendation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationPolicy {
    /// Exact number of records.
    pub total: usize,
    /// Exact number of Free or Freemium records.
    pub free: usize,
    /// Exact number of Paid records.
    pub paid: usize,
}

impl RecommendationPolicy {
    /// Nine recommendations: five free or freemium, four paid.
    pub const STANDARD: RecommendationPolicy = RecommendationPolicy {
        total: 9,
        free: 5,
        paid: 4,
    };

    /// Checks the aggregate count and tier split of `tools`.
    pub fn check(&self, tools: &[ToolRecord]) -> Result<(), PolicyMismatch> {
        let free = tools
            .iter()
            .filter(|t| t.pricing_tier.is_free_or_freemium())
            .count();
        let paid = tools.len() - free;

        if tools.len() != self.total || free != self.free || paid != self.paid {
            return Err(PolicyMismatch {
                expected: *self,
                total: tools.len(),
                free,
                paid,
            });
        }
        Ok(())
    }
}

impl fmt::Display for RecommendationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tools ({} free/freemium, {} paid)",
            self.total, self.free, self.paid
        )
    }
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Valid records, wrong aggregate count or tier split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {total} ({free} free/freemium, {paid} paid)")]
pub struct PolicyMismatch {
    pub expected: RecommendationPolicy,
    pub total: usize,
    pub free: usize,
    pub paid: usize,
}
