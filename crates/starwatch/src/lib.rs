//! Starwatch - watches a user's GitHub repositories for star, fork and
//! traffic changes.
//!
//! The remote API only exposes a rolling 14-day traffic window, so this
//! crate maintains its own monotonic lifetime counters by diffing
//! successive window observations, persists one snapshot per repository as
//! the comparison baseline, and raises an event the first time a star or
//! fork count rises past the persisted value.
//!
//! The library is a pure function of (configuration, remote state, stored
//! state): scheduling, presentation and storage technology live behind the
//! [`sync`], [`notify`] and [`store`] seams.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use starwatch::github::GitHubClient;
//! use starwatch::http::ReqwestTransport;
//! use starwatch::notify::TracingSink;
//! use starwatch::store::JsonFileStore;
//! use starwatch::sync::{CancelToken, PassOptions, run_pass};
//!
//! let transport = ReqwestTransport::with_timeout(std::time::Duration::from_secs(30))?;
//! let client = GitHubClient::new(transport, Some(token));
//! let store = Arc::new(JsonFileStore::new(state_path));
//! let sink = Arc::new(TracingSink);
//!
//! let (outcome, report) =
//!     run_pass(&client, store, sink, &PassOptions::default(), CancelToken::new(), None).await;
//! ```

pub mod detect;
pub mod github;
pub mod http;
pub mod model;
pub mod notify;
pub mod retry;
pub mod store;
pub mod sync;
pub mod traffic;

pub use detect::RepoEvent;
pub use github::{ApiError, GitHubClient, RemoteApiClient};
pub use model::{RepositorySnapshot, UserConfig};
pub use notify::{NotificationSink, TracingSink};
pub use retry::Verdict;
pub use store::{InMemoryStore, JsonFileStore, SnapshotStore, StoreError};
pub use sync::{CancelToken, PassOptions, SyncOutcome, SyncReport, run_pass};
