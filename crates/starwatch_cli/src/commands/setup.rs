//! User configuration management.

use std::sync::Arc;

use console::style;
use starwatch::model::UserConfig;
use starwatch::store::{JsonFileStore, SnapshotStore};

use super::CommandError;

/// Create or update the user configuration, preserving the selection.
pub async fn handle_setup(
    store: Arc<JsonFileStore>,
    username: String,
    token: Option<String>,
    interval_minutes: Option<u32>,
) -> Result<(), CommandError> {
    let mut config = store
        .get_user_config()
        .await?
        .unwrap_or_else(|| UserConfig::new(username.clone()));

    config.username = username;
    if let Some(token) = token {
        config.personal_access_token = Some(token);
    }
    if let Some(minutes) = interval_minutes {
        if minutes == 0 {
            return Err("check interval must be at least 1 minute".into());
        }
        config.check_interval_minutes = minutes;
    }

    store.put_user_config(&config).await?;

    println!(
        "Configured {} (check every {} minutes, token {})",
        style(&config.username).bold(),
        config.check_interval_minutes,
        if config.personal_access_token.is_some() {
            "set"
        } else {
            "not set; traffic will be skipped"
        }
    );

    Ok(())
}
