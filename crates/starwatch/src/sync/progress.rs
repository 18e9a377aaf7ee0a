//! Progress reporting for sync passes.
//!
//! Events describe what the engine is doing so a frontend (CLI logger,
//! interactive UI) can narrate a pass without the engine knowing about
//! presentation.

/// Progress events emitted during a sync pass.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// No user configuration exists; the pass is a no-op.
    NoConfig,

    /// The selection is empty; the pass is a no-op.
    NothingSelected,

    /// Fetching the repository list.
    FetchingRepoList {
        /// Account being listed.
        username: String,
        /// Number of selected repositories to reconcile.
        selected: usize,
    },

    /// Repository list fetched.
    RepoListFetched {
        /// Public repositories returned by the API.
        total: usize,
    },

    /// A selected repository was not in the fetched list.
    SelectedRepoMissing { name: String },

    /// Traffic data could not be fetched for one repository this pass.
    TrafficDegraded { name: String, reason: String },

    /// One repository finished fetch/accumulate/detect/persist.
    RepoProcessed {
        name: String,
        /// Events emitted for this repository this pass.
        events: usize,
    },

    /// A snapshot write failed; siblings are unaffected.
    PersistFailed { name: String, error: String },

    /// The pass was cancelled; remaining units were skipped.
    Cancelled { skipped: usize },
}

/// Callback for observing [`SyncProgress`] events.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit an event to an optional callback.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(callback) = on_progress {
        callback(event);
    }
}
