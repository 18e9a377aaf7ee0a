//! Failure classification and retry backoff.
//!
//! The scheduler driving [`crate::sync::run_pass`] needs to know whether a
//! failed pass is worth re-running. [`classify`] maps an API error to that
//! verdict; [`RetryConfig`] builds the backoff schedule a caller uses when
//! the verdict is [`Verdict::Retry`].

use std::time::Duration;

use backon::ExponentialBuilder;

use crate::github::ApiError;

/// Minimum delay between retried passes.
pub const INITIAL_BACKOFF_MS: u64 = 1_000;

/// Maximum delay between retried passes.
pub const MAX_BACKOFF_MS: u64 = 60_000;

/// Maximum retry attempts for one failed pass.
pub const MAX_PASS_RETRIES: u32 = 5;

/// What a scheduler should do with a failed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Transient: run the pass again after a backoff.
    Retry,
    /// The request is wrong as posed (bad user, revoked token); retrying
    /// cannot help.
    PermanentFailure,
}

/// Classify an API error into a scheduler verdict.
///
/// Transport-level failures and 429/5xx statuses are transient. Other 4xx
/// statuses are permanent. Anything of unrecognized shape fails open toward
/// retry so a novel transient failure is never silently dropped.
#[must_use]
pub fn classify(error: &ApiError) -> Verdict {
    match error {
        ApiError::Transport { .. } => Verdict::Retry,
        ApiError::Status { status, .. } => {
            if *status == 429 || *status >= 500 {
                Verdict::Retry
            } else {
                Verdict::PermanentFailure
            }
        }
        ApiError::Decode { .. } | ApiError::Internal { .. } => Verdict::Retry,
    }
}

/// Configuration for retry backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Minimum delay between retries.
    pub min_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Maximum number of retry attempts.
    pub max_retries: usize,
    /// Whether to add jitter to delays.
    pub with_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(INITIAL_BACKOFF_MS),
            max_delay: Duration::from_millis(MAX_BACKOFF_MS),
            max_retries: MAX_PASS_RETRIES as usize,
            with_jitter: true,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn new(min_delay: Duration, max_delay: Duration, max_retries: usize) -> Self {
        Self {
            min_delay,
            max_delay,
            max_retries,
            with_jitter: true,
        }
    }

    #[must_use]
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.with_jitter = jitter;
        self
    }

    /// Build an exponential backoff strategy from this configuration.
    #[must_use]
    pub fn into_backoff(self) -> ExponentialBuilder {
        let mut builder = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries);

        if self.with_jitter {
            builder = builder.with_jitter();
        }

        builder
    }
}

/// The standard backoff schedule for re-running a retryable pass.
#[must_use]
pub fn default_backoff() -> ExponentialBuilder {
    RetryConfig::default().into_backoff()
}
