//! In-memory snapshot store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Result, SnapshotStore, StoreError};
use crate::model::{RepositorySnapshot, UserConfig};

/// Non-durable store backed by a shared map.
///
/// Used by tests and embeddings that manage durability themselves. Clones
/// share the same underlying state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    snapshots: HashMap<String, RepositorySnapshot>,
    config: Option<UserConfig>,
    /// Names whose writes should fail, for failure-path tests.
    failing_puts: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `put_snapshot` for `name` fail with an I/O error.
    pub fn fail_puts_for(&self, name: impl Into<String>) {
        self.lock().failing_puts.push(name.into());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SnapshotStore for InMemoryStore {
    async fn get_snapshot(&self, name: &str) -> Result<Option<RepositorySnapshot>> {
        Ok(self.lock().snapshots.get(name).cloned())
    }

    async fn put_snapshot(&self, snapshot: &RepositorySnapshot) -> Result<()> {
        let mut inner = self.lock();
        if inner.failing_puts.iter().any(|n| n == &snapshot.name) {
            return Err(StoreError::Io(std::io::Error::other(format!(
                "injected write failure for {}",
                snapshot.name
            ))));
        }
        inner
            .snapshots
            .insert(snapshot.name.clone(), snapshot.clone());
        Ok(())
    }

    async fn list_snapshots(&self) -> Result<Vec<RepositorySnapshot>> {
        let mut snapshots: Vec<_> = self.lock().snapshots.values().cloned().collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snapshots)
    }

    async fn get_user_config(&self) -> Result<Option<UserConfig>> {
        Ok(self.lock().config.clone())
    }

    async fn put_user_config(&self, config: &UserConfig) -> Result<()> {
        self.lock().config = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(name: &str) -> RepositorySnapshot {
        RepositorySnapshot {
            name: name.into(),
            current_stars: 1,
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
            is_selected: true,
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryStore::new();
        store.put_snapshot(&snapshot("me/a")).await.unwrap();

        let loaded = store.get_snapshot("me/a").await.unwrap();
        assert_eq!(loaded.map(|s| s.name), Some("me/a".to_string()));
        assert!(store.get_snapshot("me/missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn selected_names_come_from_config() {
        let store = InMemoryStore::new();
        assert!(store.get_selected_repo_names().await.unwrap().is_empty());

        let mut config = UserConfig::new("me");
        config.select("me/a");
        store.put_user_config(&config).await.unwrap();

        assert_eq!(store.get_selected_repo_names().await.unwrap(), ["me/a"]);
    }

    #[tokio::test]
    async fn injected_put_failure_only_hits_named_repo() {
        let store = InMemoryStore::new();
        store.fail_puts_for("me/bad");

        assert!(store.put_snapshot(&snapshot("me/bad")).await.is_err());
        assert!(store.put_snapshot(&snapshot("me/good")).await.is_ok());
    }
}
