//! Minimal HTTP transport boundary.
//!
//! All socket I/O in this crate goes through the [`HttpTransport`] trait so
//! the GitHub client can be exercised in tests without a network. The API
//! surface is read-only, so the transport only models GET requests.

use async_trait::async_trait;
use thiserror::Error;

/// HTTP headers represented as key/value pairs.
///
/// Header names are treated case-insensitively by helper functions.
pub type HttpHeaders = Vec<(String, String)>;

/// A GET request against the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HttpHeaders,
}

impl HttpRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A response as seen by the client layer: status plus raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors raised below the HTTP status layer: connection refused, DNS
/// failure, timeouts, TLS trouble.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("http transport error: {0}")]
    Transport(String),

    #[error("no mock response registered for {url}")]
    NoMockResponse { url: String },
}

/// Transport boundary for all HTTP I/O.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Get the first header value matching `name` (case-insensitive).
#[must_use]
pub fn header_get<'a>(headers: &'a HttpHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// A real HTTP transport backed by reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport with a request timeout applied to every call.
    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.client.get(&request.url);
        for (k, v) in request.headers {
            builder = builder.header(&k, &v);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

// ---------- Test-only mock transport ----------


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    #[test]
    fn header_get_is_case_insensitive() {
        let headers = vec![("Authorization".to_string(), "token abc".to_string())];
        assert_eq!(header_get(&headers, "authorization"), Some("token abc"));
        assert_eq!(header_get(&headers, "x-missing"), None);
    }

    #[test]
    fn request_builder_collects_headers() {
        let req = HttpRequest::get("https://api.github.com/x")
            .header("Accept", "application/vnd.github+json");
        assert_eq!(req.headers.len(), 1);
    }

    #[tokio::test]
    async fn mock_returns_responses_in_fifo_order() {
        let mock = MockTransport::new();
        mock.push_json("u", "1");
        mock.push_json("u", "2");

        let first = mock.send(HttpRequest::get("u")).await.unwrap();
        let second = mock.send(HttpRequest::get("u")).await.unwrap();
        assert_eq!(first.body, b"1");
        assert_eq!(second.body, b"2");
    }

    #[tokio::test]
    async fn mock_errors_on_unregistered_url() {
        let mock = MockTransport::new();
        let err = mock.send(HttpRequest::get("nope")).await.unwrap_err();
        assert!(matches!(err, HttpError::NoMockResponse { .. }));
    }
}
