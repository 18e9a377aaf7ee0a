//! The sync pass engine.
//!
//! One call to [`run_pass`] is one scheduler tick: load the configuration,
//! fetch the repository list, fan out per-repository units (traffic fetch,
//! accumulation, change detection, persistence), join them, and classify
//! the result for the scheduler.
//!
//! Per-repository units are independent: a traffic failure or a bad store
//! record on one repository never blocks its siblings. Only the list fetch
//! can fail the pass as a whole. The caller must guarantee at most one
//! concurrent pass system-wide; within a pass each unit exclusively owns
//! its snapshot record, so no further locking is needed.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;

use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{CancelToken, PassOptions, SyncOutcome, SyncReport};
use crate::detect;
use crate::github::{RemoteApiClient, RepoSummary};
use crate::model::RepositorySnapshot;
use crate::notify::NotificationSink;
use crate::retry::classify;
use crate::store::SnapshotStore;
use crate::traffic;

/// What one per-repository unit reports back to the join loop.
struct UnitOutcome {
    name: String,
    events: usize,
    degraded_reason: Option<String>,
    persisted: bool,
    cancelled: bool,
    error: Option<String>,
}

impl UnitOutcome {
    fn cancelled(name: String) -> Self {
        Self {
            name,
            events: 0,
            degraded_reason: None,
            persisted: false,
            cancelled: true,
            error: None,
        }
    }
}

/// Run one sync pass.
///
/// Returns the scheduler outcome together with a report of what happened.
/// Absent configuration and an empty selection are successful no-ops; a
/// list-fetch failure is classified through [`crate::retry::classify`]; a
/// snapshot-write failure turns the pass into a `PermanentFailure` only
/// when no repository persisted at all, so one bad record cannot put the
/// scheduler into a retry storm.
#[tracing::instrument(skip_all)]
pub async fn run_pass<C: RemoteApiClient + Clone + 'static>(
    client: &C,
    store: Arc<dyn SnapshotStore>,
    sink: Arc<dyn NotificationSink>,
    options: &PassOptions,
    cancel: CancelToken,
    on_progress: Option<&ProgressCallback>,
) -> (SyncOutcome, SyncReport) {
    let mut report = SyncReport::default();

    // Step 1: configuration. Absent config means nothing is set up yet.
    let config = match store.get_user_config().await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("no user configuration, skipping pass");
            emit(on_progress, SyncProgress::NoConfig);
            return (SyncOutcome::Success, report);
        }
        Err(e) => {
            // Can't even read local state; let the scheduler try again.
            tracing::warn!(error = %e, "failed to load user configuration");
            report.errors.push(format!("config load: {e}"));
            return (SyncOutcome::Retry, report);
        }
    };

    // Step 2: selection.
    if config.selected_repos.is_empty() {
        tracing::debug!("selection is empty, skipping pass");
        emit(on_progress, SyncProgress::NothingSelected);
        return (SyncOutcome::Success, report);
    }

    emit(
        on_progress,
        SyncProgress::FetchingRepoList {
            username: config.username.clone(),
            selected: config.selected_repos.len(),
        },
    );

    // Step 3: repository list. The only fetch whose failure fails the pass.
    let repos = match client.list_user_repos(&config.username).await {
        Ok(repos) => repos,
        Err(e) => {
            let verdict = classify(&e);
            tracing::warn!(error = %e, ?verdict, "repository list fetch failed");
            report.errors.push(format!("list fetch: {e}"));
            return (verdict.into(), report);
        }
    };

    emit(on_progress, SyncProgress::RepoListFetched { total: repos.len() });

    let mut by_name: HashMap<String, RepoSummary> = repos
        .into_iter()
        .map(|r| (r.full_name.clone(), r))
        .collect();

    // Step 4: fan out one unit per selected repository present in the list.
    let concurrency = options.concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(config.selected_repos.len());

    for name in &config.selected_repos {
        let Some(summary) = by_name.remove(name) else {
            tracing::info!(repo = %name, "selected repository not in fetched list, skipping");
            emit(on_progress, SyncProgress::SelectedRepoMissing { name: name.clone() });
            report.missing += 1;
            continue;
        };

        let client = client.clone();
        let store = Arc::clone(&store);
        let sink = Arc::clone(&sink);
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();

        handles.push(tokio::spawn(async move {
            let name = summary.full_name.clone();

            let Ok(_permit) = semaphore.acquire().await else {
                return UnitOutcome::cancelled(name);
            };
            if cancel.is_cancelled() {
                return UnitOutcome::cancelled(name);
            }

            process_repo(&client, store.as_ref(), sink.as_ref(), summary).await
        }));
    }

    // Step 5: join. Units already run independently; this only gathers results.
    for handle in handles {
        match handle.await {
            Ok(unit) => {
                if unit.cancelled {
                    report.cancelled += 1;
                    continue;
                }

                report.processed += 1;
                report.notified += unit.events;

                if let Some(reason) = unit.degraded_reason {
                    report.degraded += 1;
                    emit(
                        on_progress,
                        SyncProgress::TrafficDegraded {
                            name: unit.name.clone(),
                            reason,
                        },
                    );
                }

                if let Some(error) = unit.error {
                    if !unit.persisted {
                        report.persist_failures += 1;
                        emit(
                            on_progress,
                            SyncProgress::PersistFailed {
                                name: unit.name.clone(),
                                error: error.clone(),
                            },
                        );
                    }
                    report.errors.push(format!("{}: {error}", unit.name));
                } else {
                    emit(
                        on_progress,
                        SyncProgress::RepoProcessed {
                            name: unit.name,
                            events: unit.events,
                        },
                    );
                }
            }
            Err(e) => {
                report.processed += 1;
                report.persist_failures += 1;
                report.errors.push(format!("unit panicked: {e}"));
            }
        }
    }

    if report.cancelled > 0 {
        emit(on_progress, SyncProgress::Cancelled { skipped: report.cancelled });
    }

    // Step 6: outcome. Persist failures fail the pass only when they were
    // its sole content; otherwise the successful siblings carry it.
    let outcome = if report.processed > 0 && report.persist_failures == report.processed {
        SyncOutcome::PermanentFailure
    } else {
        SyncOutcome::Success
    };

    tracing::info!(
        processed = report.processed,
        notified = report.notified,
        missing = report.missing,
        degraded = report.degraded,
        errors = report.errors.len(),
        "pass complete"
    );

    (outcome, report)
}

/// Fetch, accumulate, detect and persist one repository.
async fn process_repo<C: RemoteApiClient>(
    client: &C,
    store: &dyn SnapshotStore,
    sink: &dyn NotificationSink,
    summary: RepoSummary,
) -> UnitOutcome {
    let name = summary.full_name.clone();

    // Baseline for both accumulation and change detection. A read failure
    // must not silently rebootstrap the lifetime counters, so it aborts the
    // unit instead of being treated as a first observation.
    let previous = match store.get_snapshot(&name).await {
        Ok(previous) => previous,
        Err(e) => {
            tracing::warn!(repo = %name, error = %e, "failed to read previous snapshot");
            return UnitOutcome {
                name,
                events: 0,
                degraded_reason: None,
                persisted: false,
                cancelled: false,
                error: Some(format!("snapshot read: {e}")),
            };
        }
    };

    // Traffic windows need a credential; without one this is a known
    // degraded mode, not an error.
    let (owner, repo) = summary.owner_and_repo();
    let fetched = if client.has_credential() {
        match tokio::try_join!(client.fetch_views(owner, repo), client.fetch_clones(owner, repo)) {
            Ok((views, clones)) => Ok((views, clones)),
            Err(e) => Err(e.to_string()),
        }
    } else {
        Err("no credential configured".to_string())
    };

    let (totals, views_series, clones_series, degraded_reason) = match fetched {
        Ok((views, clones)) => {
            let totals = traffic::accumulate(previous.as_ref(), &views, &clones);
            (totals, views.views, clones.clones, None)
        }
        Err(reason) => {
            tracing::debug!(repo = %name, reason = %reason, "traffic fetch degraded");
            (traffic::degraded(previous.as_ref()), Vec::new(), Vec::new(), Some(reason))
        }
    };

    let current = RepositorySnapshot {
        name: name.clone(),
        current_stars: summary.stargazers_count,
        current_forks: summary.forks_count,
        total_views: totals.total_views,
        total_clones: totals.total_clones,
        lifetime_views: totals.lifetime_views,
        lifetime_clones: totals.lifetime_clones,
        two_week_views: totals.two_week_views,
        two_week_clones: totals.two_week_clones,
        views_series,
        clones_series,
        last_checked: Utc::now(),
        is_selected: true,
    };

    let events = detect::detect(previous.as_ref(), &current);
    for event in &events {
        sink.notify(event).await;
    }

    // Persist unconditionally so last_checked and the accumulated traffic
    // always advance, even on a changeless pass.
    let (persisted, error) = match store.put_snapshot(&current).await {
        Ok(()) => (true, None),
        Err(e) => {
            tracing::warn!(repo = %name, error = %e, "failed to persist snapshot");
            (false, Some(format!("snapshot write: {e}")))
        }
    };

    UnitOutcome {
        name,
        events: events.len(),
        degraded_reason,
        persisted,
        cancelled: false,
        error,
    }
}
