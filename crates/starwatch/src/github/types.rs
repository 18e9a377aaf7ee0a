//! GitHub API wire types.
//!
//! Field names match the REST v3 payloads so the structs deserialize
//! directly from the response bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry from `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    /// Short name, e.g. "starwatch".
    pub name: String,
    /// Qualified name, e.g. "aatricks/starwatch". Used as the snapshot key.
    pub full_name: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Private repositories are filtered out before any further processing.
    pub private: bool,
}

impl RepoSummary {
    /// Split the qualified name into (owner, repo).
    ///
    /// Falls back to `name` for the repo half if the qualified name carries
    /// no slash, which the API does not normally produce.
    #[must_use]
    pub fn owner_and_repo(&self) -> (&str, &str) {
        match self.full_name.split_once('/') {
            Some((owner, repo)) => (owner, repo),
            None => ("", self.name.as_str()),
        }
    }
}

/// One day of the rolling 14-day traffic window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct TrafficEntry {
    pub timestamp: DateTime<Utc>,
    pub count: u64,
    pub uniques: u64,
}

/// Response of `GET /repos/{owner}/{repo}/traffic/views`.
///
/// `count` is the rolling 14-day total reported by GitHub, not an all-time
/// figure; the daily breakdown lives in `views`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficViews {
    pub count: u64,
    pub uniques: u64,
    #[serde(default)]
    pub views: Vec<TrafficEntry>,
}

/// Response of `GET /repos/{owner}/{repo}/traffic/clones`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficClones {
    pub count: u64,
    pub uniques: u64,
    #[serde(default)]
    pub clones: Vec<TrafficEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_summary_deserializes_from_api_payload() {
        let json = r#"{
            "name": "starwatch",
            "full_name": "aatricks/starwatch",
            "stargazers_count": 42,
            "forks_count": 7,
            "private": false,
            "watchers_count": 42
        }"#;

        let repo: RepoSummary = serde_json::from_str(json).unwrap();
        assert_eq!(repo.full_name, "aatricks/starwatch");
        assert_eq!(repo.stargazers_count, 42);
        assert_eq!(repo.owner_and_repo(), ("aatricks", "starwatch"));
    }

    #[test]
    fn traffic_views_defaults_to_empty_series() {
        let json = r#"{"count": 10, "uniques": 3}"#;
        let views: TrafficViews = serde_json::from_str(json).unwrap();
        assert_eq!(views.count, 10);
        assert!(views.views.is_empty());
    }

    #[test]
    fn traffic_entry_parses_github_timestamps() {
        let json = r#"{
            "count": 5,
            "uniques": 2,
            "clones": [
                {"timestamp": "2026-07-24T00:00:00Z", "count": 3, "uniques": 1},
                {"timestamp": "2026-07-25T00:00:00Z", "count": 2, "uniques": 1}
            ]
        }"#;

        let clones: TrafficClones = serde_json::from_str(json).unwrap();
        assert_eq!(clones.clones.len(), 2);
        assert_eq!(clones.clones[0].count, 3);
    }
}
