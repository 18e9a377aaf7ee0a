//! Repository selection management.

use std::sync::Arc;

use clap::Subcommand;
use console::style;
use starwatch::store::{JsonFileStore, SnapshotStore};

use super::CommandError;

/// Selection subcommands.
#[derive(Subcommand)]
pub enum SelectAction {
    /// Add repositories to the watch list (qualified names, e.g. "owner/repo")
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove repositories from the watch list
    Remove {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Show the watch list
    List,
}

/// Handle selection commands.
pub async fn handle_select(
    store: Arc<JsonFileStore>,
    action: SelectAction,
) -> Result<(), CommandError> {
    let Some(mut config) = store.get_user_config().await? else {
        return Err("not configured yet; run `starwatch setup <username>` first".into());
    };

    match action {
        SelectAction::Add { names } => {
            for name in names {
                if !name.contains('/') {
                    return Err(format!("'{name}' is not a qualified owner/repo name").into());
                }
                if config.select(name.clone()) {
                    println!("Watching {}", style(&name).bold());
                } else {
                    println!("{} already watched", style(&name).bold());
                }
            }
            store.put_user_config(&config).await?;
        }

        SelectAction::Remove { names } => {
            for name in names {
                if config.deselect(&name) {
                    println!("Stopped watching {}", style(&name).bold());
                } else {
                    println!("{} was not watched", style(&name).bold());
                }
            }
            store.put_user_config(&config).await?;
        }

        SelectAction::List => {
            if config.selected_repos.is_empty() {
                println!("Watch list is empty. Add with: starwatch select add <owner/repo>");
            } else {
                for name in &config.selected_repos {
                    println!("{name}");
                }
            }
        }
    }

    Ok(())
}
