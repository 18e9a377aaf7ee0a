//! Notification boundary.
//!
//! Presentation (desktop popups, chat hooks, whatever) lives outside this
//! crate; the engine only pushes events through [`NotificationSink`]. The
//! shipped [`TracingSink`] renders them as log records.

use async_trait::async_trait;

use crate::detect::RepoEvent;

/// Outward channel for star/fork events.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: &RepoEvent);
}

/// Sink that reports events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn notify(&self, event: &RepoEvent) {
        match event {
            RepoEvent::StarIncrease { name, stars } => {
                tracing::info!(repo = %name, stars, "new stargazer");
            }
            RepoEvent::ForkIncrease { name, forks } => {
                tracing::info!(repo = %name, forks, "new fork");
            }
        }
    }
}
