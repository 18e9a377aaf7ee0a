//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when talking to the GitHub API.
///
/// The variants deliberately mirror how failures are classified for the
/// scheduler: connectivity problems, remote status codes, and everything
/// else. See [`crate::retry::classify`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure: connection refused, DNS, timeout.
    #[error("network error: {message}")]
    Transport { message: String },

    /// The remote answered with a non-success status code.
    #[error("GitHub returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The remote answered 200 but the body did not decode.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Unexpected/internal error.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    #[inline]
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The HTTP status carried by this error, if any.
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is a rate limit or server-side failure (429/5xx).
    #[inline]
    #[must_use]
    pub fn is_rate_limited_or_server(&self) -> bool {
        matches!(self.status(), Some(status) if status == 429 || status >= 500)
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Transport(message) => Self::Transport { message },
            HttpError::NoMockResponse { url } => Self::Internal {
                message: format!("no mock response for {url}"),
            },
        }
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
