//! Process configuration for the CLI.
//!
//! Loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `STARWATCH_`, e.g. `STARWATCH_GITHUB_TOKEN`)
//! 3. Config file (`~/.config/starwatch/config.toml`)
//! 4. Built-in defaults
//!
//! This is configuration of the *process* — where the snapshot store lives,
//! an optional token override, fan-out width. The watched account, its
//! selection and its stored token are the persisted `UserConfig` record,
//! managed with `starwatch setup` and `starwatch select`.
//!
//! Example config file:
//! ```toml
//! [store]
//! path = "~/.local/state/starwatch/starwatch.json"  # optional, this is the default
//!
//! [github]
//! token = "ghp_..."  # or use STARWATCH_GITHUB_TOKEN env var
//!
//! [sync]
//! concurrency = 8
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

use starwatch::sync::DEFAULT_CONCURRENCY;

/// Top-level process configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snapshot store configuration.
    pub store: StoreSettings,
    /// GitHub configuration.
    pub github: GitHubSettings,
    /// Sync pass configuration.
    pub sync: SyncSettings,
}

/// Snapshot store configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path of the JSON store document.
    /// Defaults to `~/.local/state/starwatch/starwatch.json` (XDG state dir).
    pub path: Option<PathBuf>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// Token override. Takes precedence over the token stored in the
    /// user configuration record.
    pub token: Option<String>,
}

/// Sync pass configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Maximum concurrent per-repository units.
    pub concurrency: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Settings {
    /// Load settings from the config file and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file_path() {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder
            .add_source(
                Environment::with_prefix("STARWATCH")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Resolve the store path, falling back to the XDG state directory.
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = &self.store.path {
            return path.clone();
        }

        project_dirs()
            .map(|dirs| {
                dirs.state_dir()
                    .unwrap_or_else(|| dirs.data_local_dir())
                    .join("starwatch.json")
            })
            .unwrap_or_else(|| PathBuf::from("starwatch.json"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "aatricks", "starwatch")
}

fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane_without_any_sources() {
        let settings = Settings::default();
        assert!(settings.github.token.is_none());
        assert_eq!(settings.sync.concurrency, DEFAULT_CONCURRENCY);
        assert!(settings.store_path().ends_with("starwatch.json"));
    }

    #[test]
    fn explicit_store_path_wins() {
        let settings = Settings {
            store: StoreSettings {
                path: Some(PathBuf::from("/tmp/custom.json")),
            },
            ..Settings::default()
        };
        assert_eq!(settings.store_path(), PathBuf::from("/tmp/custom.json"));
    }
}
