//! In-Memory Recommendation Store Adapter
//!
//! Keeps recommendation sets in process memory. Contents are lost on restart.
//! Used when no data directory is configured, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::RecommendationId;
use crate::domain::recommendation::{NewRecommendationSet, RecommendationSet};
use crate::ports::{RecommendationStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    sets: HashMap<RecommendationId, RecommendationSet>,
    /// Ids in insertion order.
    order: Vec<RecommendationId>,
}

/// In-memory storage for recommendation sets
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecommendationStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryRecommendationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sets
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRecommendationStore {
    async fn create(&self, new_set: NewRecommendationSet) -> Result<RecommendationSet, StoreError> {
        let set = new_set.into_recommendation_set();

        let mut inner = self.inner.write().await;
        inner.order.push(set.id());
        inner.sets.insert(set.id(), set.clone());

        Ok(set)
    }

    async fn get(&self, id: RecommendationId) -> Result<Option<RecommendationSet>, StoreError> {
        Ok(self.inner.read().await.sets.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<RecommendationSet>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.sets.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::{PricingTier, ToolRecord};

    fn new_set(input: &str) -> NewRecommendationSet {
        NewRecommendationSet::new(
            input,
            vec![ToolRecord::new("Canva", "Design", PricingTier::Free, "Posts")],
        )
        .with_used_provider("Gemini")
    }

    #[tokio::test]
    async fn create_assigns_id_and_round_trips() {
        let store = InMemoryRecommendationStore::new();
        let created = store.create(new_set("a bakery")).await.unwrap();

        let loaded = store.get(created.id()).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.user_input(), "a bakery");
        assert_eq!(loaded.used_provider(), Some("Gemini"));
    }

    #[tokio::test]
    async fn repeated_get_returns_identical_set() {
        let store = InMemoryRecommendationStore::new();
        let created = store.create(new_set("a bakery")).await.unwrap();
        store.create(new_set("a florist")).await.unwrap();

        let first = store.get(created.id()).await.unwrap().unwrap();
        for _ in 0..3 {
            let again = store.get(created.id()).await.unwrap().unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(first, created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = InMemoryRecommendationStore::new();
        assert!(store.get(RecommendationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_in_creation_order() {
        let store = InMemoryRecommendationStore::new();
        let first = store.create(new_set("first")).await.unwrap();
        let second = store.create(new_set("second")).await.unwrap();
        let third = store.create(new_set("third")).await.unwrap();

        let ids: Vec<_> = store.list().await.unwrap().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![first.id(), second.id(), third.id()]);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = InMemoryRecommendationStore::new();
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(new_set(&format!("input {}", i))).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.len().await, 20);
        let mut ids: Vec<_> = store.list().await.unwrap().iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryRecommendationStore::new();
        assert!(store.is_empty().await);
        assert!(store.list().await.unwrap().is_empty());
    }
}
