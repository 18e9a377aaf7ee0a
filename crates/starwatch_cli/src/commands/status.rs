//! Stored snapshot listing.

use std::sync::Arc;

use console::style;
use starwatch::store::{JsonFileStore, SnapshotStore};

use super::CommandError;

/// Print every stored snapshot.
pub async fn handle_status(store: Arc<JsonFileStore>) -> Result<(), CommandError> {
    let config = store.get_user_config().await?;

    let Some(config) = config else {
        println!("Not configured yet. Run: starwatch setup <username>");
        return Ok(());
    };

    println!(
        "Watching {} repositories for {}\n",
        config.selected_repos.len(),
        style(&config.username).bold()
    );

    let mut snapshots = store.list_snapshots().await?;
    snapshots.sort_by(|a, b| a.name.cmp(&b.name));

    if snapshots.is_empty() {
        println!("No snapshots yet. Run: starwatch run");
        return Ok(());
    }

    for snapshot in snapshots {
        let marker = if config.is_selected(&snapshot.name) {
            style("*").green()
        } else {
            style(" ").dim()
        };

        println!(
            "{} {}  {} stars  {} forks",
            marker,
            style(&snapshot.name).bold(),
            snapshot.current_stars,
            snapshot.current_forks,
        );
        println!(
            "    views: {} (14d) / {} (lifetime)   clones: {} (14d) / {} (lifetime)",
            snapshot.two_week_views,
            snapshot.lifetime_views,
            snapshot.two_week_clones,
            snapshot.lifetime_clones,
        );
        println!(
            "    last checked {}",
            snapshot.last_checked.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    Ok(())
}
