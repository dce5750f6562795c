//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a stored recommendation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationId(Uuid);

impl RecommendationId {
    /// Creates a new random RecommendationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RecommendationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecommendationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecommendationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_id_generates_unique_values() {
        let a = RecommendationId::new();
        let b = RecommendationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn recommendation_id_parses_from_display() {
        let id = RecommendationId::new();
        let parsed: RecommendationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn recommendation_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<RecommendationId>().is_err());
    }

    #[test]
    fn recommendation_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id = RecommendationId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
