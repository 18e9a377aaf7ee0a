//! Starwatch CLI - command-line interface for the repository watcher.

mod commands;
mod config;
mod reporter;
mod shutdown;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use starwatch::sync::{CancelToken, SyncOutcome};

use crate::commands::select::SelectAction;
use crate::config::Settings;

#[derive(Parser)]
#[command(name = "starwatch")]
#[command(version)]
#[command(about = "Watches your GitHub repositories for star, fork and traffic changes")]
#[command(
    long_about = "Starwatch periodically polls the GitHub API for a user's repositories and \
reports the first time a star or fork count rises since the last check. It \
also accumulates durable lifetime view/clone counters from the rolling \
14-day traffic window the API exposes."
)]
#[command(after_long_help = r#"EXAMPLES
    Configure the account to watch:
        $ starwatch setup aatricks --token ghp_... --interval 30

    Watch two repositories:
        $ starwatch select add aatricks/starwatch aatricks/dotfiles

    Run a single check:
        $ starwatch run

    Keep checking on the configured interval:
        $ starwatch watch

    Inspect accumulated state:
        $ starwatch status

CONFIGURATION
    Starwatch reads process configuration from:
      1. ~/.config/starwatch/config.toml (or $XDG_CONFIG_HOME/starwatch/config.toml)
      2. Environment variables (STARWATCH_* prefix)

ENVIRONMENT VARIABLES
    STARWATCH_STORE_PATH      Snapshot store path (default: ~/.local/state/starwatch/starwatch.json)
    STARWATCH_GITHUB_TOKEN    Token override for this process
    STARWATCH_SYNC_CONCURRENCY  Per-repository fan-out width

EXIT STATUS (run)
    0   pass succeeded
    1   permanent failure (bad username or token)
    75  transient failure, safe to retry
"#)]
struct Cli {
    /// Snapshot store path override
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the account to watch, its token and check interval
    Setup {
        /// GitHub username whose repositories are listed
        username: String,

        /// Personal access token (needed for traffic data)
        #[arg(short, long)]
        token: Option<String>,

        /// Minutes between checks in watch mode
        #[arg(short, long, value_name = "MINUTES")]
        interval: Option<u32>,
    },
    /// Manage the watched repository list
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Run a single sync pass
    Run,
    /// Run sync passes on the configured interval until interrupted
    Watch,
    /// Show stored snapshots
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("starwatch=info,starwatch_cli=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(store) = cli.store {
        settings.store.path = Some(store);
    }

    let store = commands::open_store(&settings);
    let cancel = CancelToken::new();

    let result = match cli.command {
        Commands::Setup {
            username,
            token,
            interval,
        } => commands::setup::handle_setup(store, username, token, interval)
            .await
            .map(|()| ExitCode::SUCCESS),

        Commands::Select { action } => commands::select::handle_select(store, action)
            .await
            .map(|()| ExitCode::SUCCESS),

        Commands::Run => {
            shutdown::setup_shutdown_handler(cancel.clone());
            commands::run::handle_run(&settings, store, cancel)
                .await
                .map(|outcome| match outcome {
                    SyncOutcome::Success => ExitCode::SUCCESS,
                    SyncOutcome::PermanentFailure => ExitCode::FAILURE,
                    // EX_TEMPFAIL, so cron-like callers can tell retryable apart.
                    SyncOutcome::Retry => ExitCode::from(75),
                })
        }

        Commands::Watch => {
            shutdown::setup_shutdown_handler(cancel.clone());
            commands::watch::handle_watch(&settings, store, cancel)
                .await
                .map(|()| ExitCode::SUCCESS)
        }

        Commands::Status => commands::status::handle_status(store)
            .await
            .map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
