//! Single sync pass.

use std::sync::Arc;

use console::style;
use starwatch::store::JsonFileStore;
use starwatch::sync::{CancelToken, SyncOutcome};

use super::{CommandError, execute_pass};
use crate::config::Settings;

/// Run one pass and report its outcome.
pub async fn handle_run(
    settings: &Settings,
    store: Arc<JsonFileStore>,
    cancel: CancelToken,
) -> Result<SyncOutcome, CommandError> {
    let outcome = execute_pass(settings, &store, &cancel).await?;

    match outcome {
        SyncOutcome::Success => {
            tracing::info!("pass succeeded");
        }
        SyncOutcome::Retry => {
            eprintln!(
                "{} transient failure, try again shortly",
                style("warning:").yellow().bold()
            );
        }
        SyncOutcome::PermanentFailure => {
            eprintln!(
                "{} pass cannot succeed as configured; check username and token",
                style("error:").red().bold()
            );
        }
    }

    Ok(outcome)
}
