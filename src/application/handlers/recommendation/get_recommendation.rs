//! GetRecommendationHandler - Query handler for retrieving a stored set

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::RecommendationId;
use crate::domain::recommendation::RecommendationSet;
use crate::ports::{RecommendationStore, StoreError};

/// Query to fetch a recommendation set by id
#[derive(Debug, Clone)]
pub struct GetRecommendationQuery {
    pub id: RecommendationId,
}

#[derive(Debug, Clone, Error)]
pub enum GetRecommendationError {
    #[error("recommendation not found: {0}")]
    NotFound(RecommendationId),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for GetRecommendationError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Handler for retrieving recommendation sets
pub struct GetRecommendationHandler {
    store: Arc<dyn RecommendationStore>,
}

impl GetRecommendationHandler {
    pub fn new(store: Arc<dyn RecommendationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetRecommendationQuery,
    ) -> Result<RecommendationSet, GetRecommendationError> {
        self.store
            .get(query.id)
            .await?
            .ok_or(GetRecommendationError::NotFound(query.id))
    }
}
