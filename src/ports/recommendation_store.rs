//! Recommendation Store Port - persistence of accepted recommendation sets.
//!
//! Sets are created once and never updated or deleted. Implementations must
//! support concurrent inserts of fresh ids alongside lookups.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::RecommendationId;
use crate::domain::recommendation::{NewRecommendationSet, RecommendationSet};

/// Port for storing and reading recommendation sets.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persists a new set, assigning its id and creation timestamp.
    async fn create(&self, new_set: NewRecommendationSet) -> Result<RecommendationSet, StoreError>;

    /// Returns the set with `id`, or `None` if unknown.
    async fn get(&self, id: RecommendationId) -> Result<Option<RecommendationSet>, StoreError>;

    /// Returns all sets in ascending creation order (oldest first).
    async fn list(&self) -> Result<Vec<RecommendationSet>, StoreError>;
}

/// Errors from the persistence backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
