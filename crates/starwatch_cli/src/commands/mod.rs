//! Command implementations.

pub mod run;
pub mod select;
pub mod setup;
pub mod status;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use starwatch::github::GitHubClient;
use starwatch::http::ReqwestTransport;
use starwatch::notify::TracingSink;
use starwatch::store::{JsonFileStore, SnapshotStore};
use starwatch::sync::{CancelToken, PassOptions, SyncOutcome, run_pass};

use crate::config::Settings;
use crate::reporter::LoggingReporter;

/// Boxed error type used by command handlers.
pub type CommandError = Box<dyn std::error::Error>;

/// Request timeout applied to every API call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Open the JSON snapshot store at the configured path.
pub(crate) fn open_store(settings: &Settings) -> Arc<JsonFileStore> {
    let path = settings.store_path();
    tracing::debug!(path = %path.display(), "opening snapshot store");
    Arc::new(JsonFileStore::new(path))
}

/// Execute one sync pass against the real API.
///
/// The token stored with `starwatch setup` is used unless the process
/// configuration overrides it.
pub(crate) async fn execute_pass(
    settings: &Settings,
    store: &Arc<JsonFileStore>,
    cancel: &CancelToken,
) -> Result<SyncOutcome, CommandError> {
    let stored_token = store
        .get_user_config()
        .await?
        .and_then(|c| c.personal_access_token);
    let token = settings.github.token.clone().or(stored_token);

    let transport = ReqwestTransport::with_timeout(HTTP_TIMEOUT)?;
    let client = GitHubClient::new(transport, token);

    let options = PassOptions {
        concurrency: settings.sync.concurrency,
    };

    let (outcome, report) = run_pass(
        &client,
        Arc::clone(store) as Arc<dyn SnapshotStore>,
        Arc::new(TracingSink),
        &options,
        cancel.clone(),
        Some(&LoggingReporter::callback()),
    )
    .await;

    if !report.errors.is_empty() {
        for error in &report.errors {
            tracing::warn!(error = %error, "pass error");
        }
    }

    Ok(outcome)
}
