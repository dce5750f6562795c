//! File-based Recommendation Store Adapter
//!
//! Stores each recommendation set as `<id>.yaml` in a data directory so
//! history survives restarts and stays readable with a text editor.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::RecommendationId;
use crate::domain::recommendation::{NewRecommendationSet, RecommendationSet};
use crate::ports::{RecommendationStore, StoreError};

/// File-based storage for recommendation sets
#[derive(Debug, Clone)]
pub struct FileRecommendationStore {
    base_path: PathBuf,
}

impl FileRecommendationStore {
    /// Create a store rooted at `base_path`
    ///
    /// The directory is created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileRecommendationStore::new("./data/recommendations");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self, id: RecommendationId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn read_set(path: &Path) -> Result<RecommendationSet, StoreError> {
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        serde_yaml::from_str(&yaml).map_err(|e| {
            StoreError::Deserialization(format!("{}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl RecommendationStore for FileRecommendationStore {
    async fn create(&self, new_set: NewRecommendationSet) -> Result<RecommendationSet, StoreError> {
        self.ensure_dir().await?;

        let set = new_set.into_recommendation_set();
        let yaml =
            serde_yaml::to_string(&set).map_err(|e| StoreError::Serialization(e.to_string()))?;

        // Write to a temp file then rename so readers never see a partial set.
        let final_path = self.file_path(set.id());
        let tmp_path = final_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &final_path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(set)
    }

    async fn get(&self, id: RecommendationId) -> Result<Option<RecommendationSet>, StoreError> {
        let path = self.file_path(id);
        match fs::metadata(&path).await {
            Ok(_) => Self::read_set(&path).await.map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<RecommendationSet>, StoreError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let mut sets = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            sets.push(Self::read_set(&path).await?);
        }

        sets.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::{PricingTier, ToolKind, ToolRecord};
    use tempfile::TempDir;

    fn new_set(input: &str) -> NewRecommendationSet {
        NewRecommendationSet::new(
            input,
            vec![
                ToolRecord::new("Canva", "Design", PricingTier::Freemium, "Posts")
                    .with_pros(vec!["Templates".to_string()])
                    .with_link("https://canva.com")
                    .with_kind(ToolKind::Tool),
                ToolRecord::new("Jasper", "Copy", PricingTier::Paid, "Captions"),
            ],
        )
        .with_used_provider("Anthropic")
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecommendationStore::new(temp_dir.path());

        let created = store.create(new_set("a bakery")).await.unwrap();
        let loaded = store.get(created.id()).await.unwrap().unwrap();

        assert_eq!(loaded, created);
        assert!(temp_dir
            .path()
            .join(format!("{}.yaml", created.id()))
            .exists());
    }

    #[tokio::test]
    async fn repeated_get_returns_identical_set() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecommendationStore::new(temp_dir.path());
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
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecommendationStore::new(temp_dir.path());

        assert!(store.get(RecommendationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecommendationStore::new(temp_dir.path().join("not-yet"));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_oldest_first_and_skips_other_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecommendationStore::new(temp_dir.path());

        let first = store.create(new_set("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.create(new_set("second")).await.unwrap();
        std::fs::write(temp_dir.path().join("README.txt"), "notes").unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), first.id());
        assert_eq!(listed[1].id(), second.id());
    }

    #[tokio::test]
    async fn data_survives_new_store_instance() {
        let temp_dir = TempDir::new().unwrap();
        let created = FileRecommendationStore::new(temp_dir.path())
            .create(new_set("persisted"))
            .await
            .unwrap();

        let reopened = FileRecommendationStore::new(temp_dir.path());
        let loaded = reopened.get(created.id()).await.unwrap().unwrap();
        assert_eq!(loaded.user_input(), "persisted");
    }

    #[tokio::test]
    async fn corrupt_file_is_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecommendationStore::new(temp_dir.path());
        let id = RecommendationId::new();
        std::fs::write(temp_dir.path().join(format!("{}.yaml", id)), "tools: [oops").unwrap();

        let err = store.get(id).await.unwrap_err();
        assert!(matches!(err, StoreError::Deserialization(_)));
    }
}
