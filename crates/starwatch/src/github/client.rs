//! GitHub API client.
//!
//! [`GitHubClient`] is a thin request-building and decoding layer over an
//! [`HttpTransport`]; it performs no business logic. The [`RemoteApiClient`]
//! trait is the seam the sync engine consumes, so tests can substitute a
//! scripted client without touching HTTP at all.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::{ApiError, Result};
use super::types::{RepoSummary, TrafficClones, TrafficViews};
use crate::http::{HttpRequest, HttpTransport};

/// Default API root for github.com.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("starwatch/", env!("CARGO_PKG_VERSION"));

/// Read-only view of the hosting API consumed by the sync engine.
#[async_trait]
pub trait RemoteApiClient: Send + Sync {
    /// List a user's repositories, private ones already filtered out.
    async fn list_user_repos(&self, username: &str) -> Result<Vec<RepoSummary>>;

    /// Fetch the rolling 14-day view series for one repository.
    async fn fetch_views(&self, owner: &str, repo: &str) -> Result<TrafficViews>;

    /// Fetch the rolling 14-day clone series for one repository.
    async fn fetch_clones(&self, owner: &str, repo: &str) -> Result<TrafficClones>;

    /// Whether a personal access token is configured.
    ///
    /// The traffic endpoints reject anonymous callers, so the engine skips
    /// them entirely when this is false.
    fn has_credential(&self) -> bool;
}

/// GitHub REST v3 client over a pluggable transport.
#[derive(Clone)]
pub struct GitHubClient<T> {
    transport: T,
    base_url: String,
    token: Option<String>,
}

impl<T: HttpTransport> GitHubClient<T> {
    pub fn new(transport: T, token: Option<String>) -> Self {
        Self::with_base_url(transport, DEFAULT_API_BASE, token)
    }

    /// Point the client at a non-default API root (GitHub Enterprise, tests).
    pub fn with_base_url(transport: T, base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            transport,
            base_url,
            token,
        }
    }

    fn request(&self, path: &str) -> HttpRequest {
        let mut request = HttpRequest::get(format!("{}{}", self.base_url, path))
            .header("Accept", ACCEPT_HEADER)
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }
        request
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let request = self.request(path);
        let url = request.url.clone();

        tracing::debug!(url = %url, "GET");
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                url,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| ApiError::decode(url, e.to_string()))
    }
}

#[async_trait]
impl<T: HttpTransport> RemoteApiClient for GitHubClient<T> {
    async fn list_user_repos(&self, username: &str) -> Result<Vec<RepoSummary>> {
        let repos: Vec<RepoSummary> = self.get_json(&format!("/users/{username}/repos")).await?;

        // Traffic and change detection only apply to public repositories.
        Ok(repos.into_iter().filter(|r| !r.private).collect())
    }

    async fn fetch_views(&self, owner: &str, repo: &str) -> Result<TrafficViews> {
        self.get_json(&format!("/repos/{owner}/{repo}/traffic/views"))
            .await
    }

    async fn fetch_clones(&self, owner: &str, repo: &str) -> Result<TrafficClones> {
        self.get_json(&format!("/repos/{owner}/{repo}/traffic/clones"))
            .await
    }

    fn has_credential(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use crate::http::{HttpResponse, header_get};

    fn client(mock: &MockTransport, token: Option<&str>) -> GitHubClient<MockTransport> {
        GitHubClient::with_base_url(mock.clone(), "https://api.test", token.map(String::from))
    }

    const REPOS_JSON: &str = r#"[
        {"name": "pub", "full_name": "me/pub", "stargazers_count": 3, "forks_count": 1, "private": false},
        {"name": "priv", "full_name": "me/priv", "stargazers_count": 9, "forks_count": 0, "private": true}
    ]"#;

    #[tokio::test]
    async fn list_user_repos_filters_private() {
        let mock = MockTransport::new();
        mock.push_json("https://api.test/users/me/repos", REPOS_JSON);

        let repos = client(&mock, None).list_user_repos("me").await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].full_name, "me/pub");
    }

    #[tokio::test]
    async fn token_is_sent_as_authorization_header() {
        let mock = MockTransport::new();
        mock.push_json("https://api.test/users/me/repos", "[]");

        client(&mock, Some("pat123"))
            .list_user_repos("me")
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(
            header_get(&requests[0].headers, "authorization"),
            Some("token pat123")
        );
        assert!(header_get(&requests[0].headers, "user-agent").is_some());
    }

    #[tokio::test]
    async fn anonymous_client_sends_no_authorization_header() {
        let mock = MockTransport::new();
        mock.push_json("https://api.test/users/me/repos", "[]");

        let api = client(&mock, None);
        assert!(!api.has_credential());
        api.list_user_repos("me").await.unwrap();

        let requests = mock.requests();
        assert_eq!(header_get(&requests[0].headers, "authorization"), None);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_status_error() {
        let mock = MockTransport::new();
        mock.push_response(
            "https://api.test/repos/me/pub/traffic/views",
            HttpResponse {
                status: 403,
                body: b"{}".to_vec(),
            },
        );

        let err = client(&mock, Some("pat"))
            .fetch_views("me", "pub")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode_error() {
        let mock = MockTransport::new();
        mock.push_json("https://api.test/users/me/repos", "not json");

        let err = client(&mock, None).list_user_repos("me").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_transport_error() {
        let mock = MockTransport::new();
        mock.push_transport_error("https://api.test/users/me/repos", "connection timed out");

        let err = client(&mock, None).list_user_repos("me").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }
}
