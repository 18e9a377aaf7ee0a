//! Durable snapshot storage boundary.
//!
//! The sync engine owns snapshot records only for the duration of a pass;
//! between passes they live behind [`SnapshotStore`]. Writes are whole-record
//! replacements so a cancelled pass never leaves a half-written snapshot.

mod json_file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{RepositorySnapshot, UserConfig};

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

/// Errors raised by a snapshot store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contains malformed data: {0}")]
    Corrupt(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable key-value persistence for snapshots and the user configuration.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load one snapshot by qualified name. Absence is not an error.
    async fn get_snapshot(&self, name: &str) -> Result<Option<RepositorySnapshot>>;

    /// Replace (or create) one snapshot as a whole record.
    async fn put_snapshot(&self, snapshot: &RepositorySnapshot) -> Result<()>;

    /// All stored snapshots, for inspection surfaces.
    async fn list_snapshots(&self) -> Result<Vec<RepositorySnapshot>>;

    /// Load the singleton user configuration, if one was ever saved.
    async fn get_user_config(&self) -> Result<Option<UserConfig>>;

    /// Replace the singleton user configuration.
    async fn put_user_config(&self, config: &UserConfig) -> Result<()>;

    /// Qualified names of the currently selected repositories.
    async fn get_selected_repo_names(&self) -> Result<Vec<String>> {
        Ok(self
            .get_user_config()
            .await?
            .map(|c| c.selected_repos)
            .unwrap_or_default())
    }
}
