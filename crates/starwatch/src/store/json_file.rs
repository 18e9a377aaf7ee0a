//! JSON-file snapshot store.
//!
//! The whole store is one JSON document: the user configuration plus a map
//! of snapshots keyed by qualified name. Writes serialize the document to a
//! sibling temp file and rename it into place, so readers never observe a
//! torn record even if the process dies mid-write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{Result, SnapshotStore, StoreError};
use crate::model::{RepositorySnapshot, UserConfig};

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<UserConfig>,
    #[serde(default)]
    snapshots: BTreeMap<String, RepositorySnapshot>,
}

/// Durable store persisting one JSON document at a fixed path.
///
/// The document is re-read on every load and rewritten atomically on every
/// put; the file is small (one record per watched repository), so this
/// favors simplicity over write amplification. A mutex serializes writers
/// within the process; cross-process exclusion is the scheduler's job.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes =
            serde_json::to_vec_pretty(document).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn get_snapshot(&self, name: &str) -> Result<Option<RepositorySnapshot>> {
        Ok(self.load().await?.snapshots.get(name).cloned())
    }

    async fn put_snapshot(&self, snapshot: &RepositorySnapshot) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        document
            .snapshots
            .insert(snapshot.name.clone(), snapshot.clone());
        self.save(&document).await
    }

    async fn list_snapshots(&self) -> Result<Vec<RepositorySnapshot>> {
        Ok(self.load().await?.snapshots.into_values().collect())
    }

    async fn get_user_config(&self) -> Result<Option<UserConfig>> {
        Ok(self.load().await?.config)
    }

    async fn put_user_config(&self, config: &UserConfig) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        document.config = Some(config.clone());
        self.save(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(name: &str, stars: u64) -> RepositorySnapshot {
        RepositorySnapshot {
            name: name.into(),
            current_stars: stars,
            current_forks: 0,
            total_views: 0,
            total_clones: 0,
            lifetime_views: 0,
            lifetime_clones: 0,
            two_week_views: 0,
            two_week_clones: 0,
            views_series: Vec::new(),
            clones_series: Vec::new(),
            last_checked: Utc::now(),
            is_selected: false,
        }
    }

    fn temp_store(test: &str) -> JsonFileStore {
        let path = std::env::temp_dir()
            .join("starwatch-store-tests")
            .join(format!("{test}-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        JsonFileStore::new(path)
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_store() {
        let store = temp_store("missing");
        assert!(store.get_user_config().await.unwrap().is_none());
        assert!(store.get_snapshot("me/a").await.unwrap().is_none());
        assert!(store.list_snapshots().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn snapshots_survive_reopening_the_file() {
        let store = temp_store("reopen");
        store.put_snapshot(&snapshot("me/a", 5)).await.unwrap();
        store.put_user_config(&UserConfig::new("me")).await.unwrap();

        let reopened = JsonFileStore::new(store.path().to_path_buf());
        let loaded = reopened.get_snapshot("me/a").await.unwrap().unwrap();
        assert_eq!(loaded.current_stars, 5);
        assert_eq!(
            reopened.get_user_config().await.unwrap().unwrap().username,
            "me"
        );
    }

    #[tokio::test]
    async fn put_replaces_whole_record() {
        let store = temp_store("replace");
        store.put_snapshot(&snapshot("me/a", 5)).await.unwrap();
        store.put_snapshot(&snapshot("me/a", 6)).await.unwrap();

        let snapshots = store.list_snapshots().await.unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].current_stars, 6);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_not_swallowed() {
        let store = temp_store("corrupt");
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), b"{ not json").unwrap();

        assert!(matches!(
            store.get_snapshot("me/a").await,
            Err(StoreError::Corrupt(_))
        ));
    }
}
