//! Periodic watch loop.
//!
//! Runs one pass per check interval, the interval coming from the stored
//! user configuration so `starwatch setup --interval` takes effect on the
//! next tick. A pass that asks for a retry is re-run on an exponential
//! backoff within the tick; a permanent failure is logged and the loop
//! keeps ticking, matching how a periodic scheduler treats a failed run.

use std::sync::Arc;
use std::time::Duration;

use backon::Retryable;
use starwatch::model::UserConfig;
use starwatch::retry::default_backoff;
use starwatch::store::{JsonFileStore, SnapshotStore};
use starwatch::sync::{CancelToken, SyncOutcome};

use super::{CommandError, execute_pass};
use crate::config::Settings;

/// Granularity at which the inter-tick sleep notices cancellation.
const SLEEP_SLICE: Duration = Duration::from_secs(1);

/// A pass outcome that should be re-run within the current tick.
#[derive(Debug)]
struct TransientPass;

impl std::fmt::Display for TransientPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("pass requested retry")
    }
}

impl std::error::Error for TransientPass {}

/// Watch until cancelled.
pub async fn handle_watch(
    settings: &Settings,
    store: Arc<JsonFileStore>,
    cancel: CancelToken,
) -> Result<(), CommandError> {
    tracing::info!("watch loop started");

    while !cancel.is_cancelled() {
        run_tick(settings, &store, &cancel).await;

        let interval = check_interval(&store).await;
        tracing::debug!(minutes = interval.as_secs() / 60, "sleeping until next tick");
        sleep_cancellable(interval, &cancel).await;
    }

    tracing::info!("watch loop stopped");
    Ok(())
}

/// Run one tick, absorbing transient failures with a backoff.
async fn run_tick(settings: &Settings, store: &Arc<JsonFileStore>, cancel: &CancelToken) {
    let attempt = || async {
        match execute_pass(settings, store, cancel).await {
            Ok(SyncOutcome::Retry) => Err(TransientPass),
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                // Local failure (store unreadable, TLS setup): worth a retry
                // within the tick as well.
                tracing::warn!(error = %e, "pass failed locally");
                Err(TransientPass)
            }
        }
    };

    let result = attempt
        .retry(default_backoff())
        .when(|_: &TransientPass| true)
        .notify(|_, dur| {
            tracing::info!(retry_in = ?dur, "transient failure, retrying pass");
        })
        .await;

    match result {
        Ok(SyncOutcome::PermanentFailure) => {
            tracing::error!("pass failed permanently; will try again next tick");
        }
        Ok(_) => {}
        Err(_) => {
            tracing::warn!("retries exhausted for this tick");
        }
    }
}

/// Read the check interval from the stored configuration.
async fn check_interval(store: &Arc<JsonFileStore>) -> Duration {
    let minutes = store
        .get_user_config()
        .await
        .ok()
        .flatten()
        .map(|c| c.check_interval_minutes)
        .filter(|m| *m > 0)
        .unwrap_or(UserConfig::DEFAULT_CHECK_INTERVAL_MINUTES);

    Duration::from_secs(u64::from(minutes) * 60)
}

/// Sleep in slices so cancellation ends the wait promptly.
async fn sleep_cancellable(duration: Duration, cancel: &CancelToken) {
    let mut remaining = duration;
    while !remaining.is_zero() && !cancel.is_cancelled() {
        let slice = remaining.min(SLEEP_SLICE);
        tokio::time::sleep(slice).await;
        remaining = remaining.saturating_sub(slice);
    }
}
