//! Sync pass infrastructure.
//!
//! - [`types`] - `SyncOutcome`, `SyncReport`, `PassOptions`, `CancelToken`
//! - [`progress`] - `SyncProgress`, `ProgressCallback`, `emit()`
//! - [`engine`] - [`run_pass`], the per-tick orchestrator

pub mod engine;
mod progress;
mod types;

pub use engine::run_pass;
pub use progress::{ProgressCallback, SyncProgress, emit};
pub use types::{CancelToken, DEFAULT_CONCURRENCY, PassOptions, SyncOutcome, SyncReport};
