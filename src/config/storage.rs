//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::ValidationError;
use crate::adapters::storage::{FileRecommendationStore, InMemoryRecommendationStore};
use crate::ports::RecommendationStore;

/// Where recommendation sets are kept
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory for YAML files; in-memory storage when unset
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn build_store(&self) -> Arc<dyn RecommendationStore> {
        match &self.data_dir {
            Some(dir) => Arc::new(FileRecommendationStore::new(dir)),
            None => Arc::new(InMemoryRecommendationStore::new()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self
            .data_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}
