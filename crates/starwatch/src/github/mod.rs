//! GitHub integration: wire types, the read-only API client, and its
//! error taxonomy.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_API_BASE, GitHubClient, RemoteApiClient};
pub use error::ApiError;
pub use types::{RepoSummary, TrafficClones, TrafficEntry, TrafficViews};
