//! Shared sync types and constants.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::retry::Verdict;

/// Default number of concurrent per-repository units in one pass.
/// Kept low to stay clear of the API's secondary rate limits.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Outcome of one sync pass, in the scheduler's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The pass did its work (possibly a configured no-op).
    Success,
    /// The pass failed transiently; run it again after a backoff.
    Retry,
    /// The pass cannot succeed as configured; do not re-run it.
    PermanentFailure,
}

impl From<Verdict> for SyncOutcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Retry => Self::Retry,
            Verdict::PermanentFailure => Self::PermanentFailure,
        }
    }
}

/// Options for one sync pass.
#[derive(Debug, Clone)]
pub struct PassOptions {
    /// Maximum concurrent per-repository units.
    pub concurrency: usize,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Result of one sync pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Repositories that ran through fetch/accumulate/persist.
    pub processed: usize,
    /// Notification events delivered to the sink.
    pub notified: usize,
    /// Selected repositories absent from the fetched list (skipped).
    pub missing: usize,
    /// Repositories whose traffic fetch degraded this pass.
    pub degraded: usize,
    /// Units skipped because the pass was cancelled mid-fan-out.
    pub cancelled: usize,
    /// Per-repository failures (store reads/writes); non-fatal.
    pub errors: Vec<String>,
    /// Units whose snapshot failed to persist.
    pub persist_failures: usize,
}

/// Cooperative cancellation flag for a pass.
///
/// The scheduler cancels; in-flight units finish their current whole-record
/// write, pending units never start. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts_map_onto_outcomes() {
        assert_eq!(SyncOutcome::from(Verdict::Retry), SyncOutcome::Retry);
        assert_eq!(
            SyncOutcome::from(Verdict::PermanentFailure),
            SyncOutcome::PermanentFailure
        );
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn pass_options_default_concurrency() {
        assert_eq!(PassOptions::default().concurrency, DEFAULT_CONCURRENCY);
    }
}
