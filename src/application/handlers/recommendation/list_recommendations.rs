//! ListRecommendationsHandler - Query handler for the stored history

use std::sync::Arc;

use crate::domain::recommendation::RecommendationSet;
use crate::ports::{RecommendationStore, StoreError};

/// Handler listing every stored set, oldest first
pub struct ListRecommendationsHandler {
    store: Arc<dyn RecommendationStore>,
}

impl ListRecommendationsHandler {
    pub fn new(store: Arc<dyn RecommendationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Vec<RecommendationSet>, StoreError> {
        self.store.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryRecommendationStore;
    use crate::domain::recommendation::NewRecommendationSet;

    #[tokio::test]
    async fn test_list_returns_sets_in_creation_order() {
        let store = Arc::new(InMemoryRecommendationStore::new());
        for input in ["first", "second"] {
            store
                .create(NewRecommendationSet::new(input, Vec::new()))
                .await
                .unwrap();
        }
        let handler = ListRecommendationsHandler::new(store);

        let inputs: Vec<_> = handler
            .handle()
            .await
            .unwrap()
            .iter()
            .map(|set| set.user_input().to_string())
            .collect();
        assert_eq!(inputs, vec!["first", "second"]);
    }
}
