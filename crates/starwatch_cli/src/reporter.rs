//! Progress reporting via tracing.

use starwatch::sync::{ProgressCallback, SyncProgress};

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    /// Build a [`ProgressCallback`] for the sync engine.
    pub fn callback() -> ProgressCallback {
        Box::new(|event| Self::handle(event))
    }

    fn handle(event: SyncProgress) {
        match event {
            SyncProgress::NoConfig => {
                tracing::info!("no configuration saved yet, run `starwatch setup` first");
            }

            SyncProgress::NothingSelected => {
                tracing::info!("no repositories selected, run `starwatch select add`");
            }

            SyncProgress::FetchingRepoList { username, selected } => {
                tracing::info!(username = %username, selected, "Fetching repository list");
            }

            SyncProgress::RepoListFetched { total } => {
                tracing::debug!(total, "Repository list fetched");
            }

            SyncProgress::SelectedRepoMissing { name } => {
                tracing::warn!(repo = %name, "Selected repository not in fetched list");
            }

            SyncProgress::TrafficDegraded { name, reason } => {
                tracing::debug!(repo = %name, reason = %reason, "Traffic unavailable this pass");
            }

            SyncProgress::RepoProcessed { name, events } => {
                tracing::debug!(repo = %name, events, "Repository processed");
            }

            SyncProgress::PersistFailed { name, error } => {
                tracing::warn!(repo = %name, error = %error, "Failed to persist snapshot");
            }

            SyncProgress::Cancelled { skipped } => {
                tracing::warn!(skipped, "Pass cancelled");
            }

            _ => {}
        }
    }
}
