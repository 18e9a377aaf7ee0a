//! Persisted data model: repository snapshots and the user configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::TrafficEntry;

/// Last-observed state of one repository.
///
/// One record exists per watched repository, keyed by its qualified name.
/// The record is the comparison baseline for both change detection and
/// traffic accumulation, and is always replaced as a whole — never patched
/// field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    /// Qualified name ("owner/repo"), globally unique key.
    pub name: String,

    // ─── Change detection baseline ───────────────────────────────────────────
    /// Star count at the last observation.
    pub current_stars: u64,
    /// Fork count at the last observation.
    pub current_forks: u64,

    // ─── Traffic ─────────────────────────────────────────────────────────────
    /// Rolling 14-day view count as last reported by the API.
    pub total_views: u64,
    /// Rolling 14-day clone count as last reported by the API.
    pub total_clones: u64,
    /// Locally accumulated all-time view estimate. Non-decreasing.
    pub lifetime_views: u64,
    /// Locally accumulated all-time clone estimate. Non-decreasing.
    pub lifetime_clones: u64,
    /// Sum of the daily view counts in the last fetched window.
    pub two_week_views: u64,
    /// Sum of the daily clone counts in the last fetched window.
    pub two_week_clones: u64,
    /// Daily view series from the last fetched window, kept for charting.
    #[serde(default)]
    pub views_series: Vec<TrafficEntry>,
    /// Daily clone series from the last fetched window, kept for charting.
    #[serde(default)]
    pub clones_series: Vec<TrafficEntry>,

    // ─── Bookkeeping ─────────────────────────────────────────────────────────
    /// When this snapshot was taken.
    pub last_checked: DateTime<Utc>,
    /// Whether the repository was in the selection when last synced.
    pub is_selected: bool,
}

/// Singleton user configuration record.
///
/// `selected_repos` holds qualified names by value; a selected name without
/// a snapshot yet is valid (it gets one on the next pass that finds it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Account whose repositories are listed.
    pub username: String,
    /// Qualified names of the repositories to watch.
    #[serde(default)]
    pub selected_repos: Vec<String>,
    /// Personal access token; required for the traffic endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_access_token: Option<String>,
    /// Minutes between scheduled passes.
    #[serde(default = "default_check_interval")]
    pub check_interval_minutes: u32,
}

fn default_check_interval() -> u32 {
    UserConfig::DEFAULT_CHECK_INTERVAL_MINUTES
}

impl UserConfig {
    pub const DEFAULT_CHECK_INTERVAL_MINUTES: u32 = 30;

    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            selected_repos: Vec::new(),
            personal_access_token: None,
            check_interval_minutes: Self::DEFAULT_CHECK_INTERVAL_MINUTES,
        }
    }

    /// Add a repository to the selection. Returns false if already present.
    pub fn select(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.selected_repos.contains(&name) {
            return false;
        }
        self.selected_repos.push(name);
        true
    }

    /// Remove a repository from the selection. Returns false if absent.
    pub fn deselect(&mut self, name: &str) -> bool {
        let before = self.selected_repos.len();
        self.selected_repos.retain(|r| r != name);
        self.selected_repos.len() != before
    }

    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected_repos.iter().any(|r| r == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_deselect_are_idempotent() {
        let mut config = UserConfig::new("me");

        assert!(config.select("me/a"));
        assert!(!config.select("me/a"));
        assert!(config.is_selected("me/a"));

        assert!(config.deselect("me/a"));
        assert!(!config.deselect("me/a"));
        assert!(!config.is_selected("me/a"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = RepositorySnapshot {
            name: "me/a".into(),
            current_stars: 10,
            current_forks: 2,
            total_views: 50,
            total_clones: 5,
            lifetime_views: 50,
            lifetime_clones: 5,
            two_week_views: 50,
            two_week_clones: 5,
            views_series: Vec::new(),
            clones_series: Vec::new(),
            last_checked: Utc::now(),
            is_selected: true,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RepositorySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn config_token_is_optional_in_stored_form() {
        let json = r#"{"username": "me", "check_interval_minutes": 30}"#;
        let config: UserConfig = serde_json::from_str(json).unwrap();
        assert!(config.personal_access_token.is_none());
        assert!(config.selected_repos.is_empty());
    }
}
