//! Traffic accumulation.
//!
//! GitHub's traffic endpoints report a rolling 14-day window, never an
//! all-time figure. Lifetime counters are therefore maintained locally by
//! diffing successive rolling totals: each pass adds the growth of the
//! rolling count since the previous pass, clamped at zero. Days falling out
//! of the window faster than new ones arrive can shrink the rolling count;
//! the clamp trades under-counting in that case for monotonicity.

use crate::github::{TrafficClones, TrafficViews};
use crate::model::RepositorySnapshot;

/// Updated traffic totals for one repository after a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficTotals {
    /// Rolling 14-day view count reported by the API this pass.
    pub total_views: u64,
    /// Rolling 14-day clone count reported by the API this pass.
    pub total_clones: u64,
    /// Sum of the daily view counts in the fetched window.
    pub two_week_views: u64,
    /// Sum of the daily clone counts in the fetched window.
    pub two_week_clones: u64,
    /// Monotonic all-time view estimate.
    pub lifetime_views: u64,
    /// Monotonic all-time clone estimate.
    pub lifetime_clones: u64,
}

/// Fold a freshly fetched traffic window into the previous snapshot's totals.
///
/// With no previous snapshot the first window bootstraps the lifetime
/// counters, since there is no baseline to diff against. Afterwards the
/// delta is taken against the previously persisted rolling totals, not the
/// two-week sums.
#[must_use]
pub fn accumulate(
    previous: Option<&RepositorySnapshot>,
    views: &TrafficViews,
    clones: &TrafficClones,
) -> TrafficTotals {
    let two_week_views: u64 = views.views.iter().map(|e| e.count).sum();
    let two_week_clones: u64 = clones.clones.iter().map(|e| e.count).sum();

    let (lifetime_views, lifetime_clones) = match previous {
        None => (two_week_views, two_week_clones),
        Some(prev) => {
            let new_views = views.count.saturating_sub(prev.total_views);
            let new_clones = clones.count.saturating_sub(prev.total_clones);
            (
                prev.lifetime_views + new_views,
                prev.lifetime_clones + new_clones,
            )
        }
    };

    TrafficTotals {
        total_views: views.count,
        total_clones: clones.count,
        two_week_views,
        two_week_clones,
        lifetime_views,
        lifetime_clones,
    }
}

/// Totals for a pass whose traffic fetch failed or was skipped.
///
/// Window totals reset to zero and the lifetime counters carry forward
/// unchanged, so a missing credential or an under-scoped token never fails
/// the pass and never corrupts the accumulated history.
#[must_use]
pub fn degraded(previous: Option<&RepositorySnapshot>) -> TrafficTotals {
    TrafficTotals {
        lifetime_views: previous.map_or(0, |p| p.lifetime_views),
        lifetime_clones: previous.map_or(0, |p| p.lifetime_clones),
        ..TrafficTotals::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::TrafficEntry;
    use chrono::{TimeZone, Utc};

    fn entry(day: u32, count: u64) -> TrafficEntry {
        TrafficEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 7, day, 0, 0, 0).unwrap(),
            count,
            uniques: count.min(3),
        }
    }

    fn views(count: u64, daily: &[u64]) -> TrafficViews {
        TrafficViews {
            count,
            uniques: 0,
            views: daily
                .iter()
                .enumerate()
                .map(|(i, c)| entry(i as u32 + 1, *c))
                .collect(),
        }
    }

    fn clones(count: u64, daily: &[u64]) -> TrafficClones {
        TrafficClones {
            count,
            uniques: 0,
            clones: daily
                .iter()
                .enumerate()
                .map(|(i, c)| entry(i as u32 + 1, *c))
                .collect(),
        }
    }

    fn previous(total_views: u64, lifetime_views: u64) -> RepositorySnapshot {
        RepositorySnapshot {
            name: "me/a".into(),
            current_stars: 0,
            current_forks: 0,
            total_views,
            total_clones: 10,
            lifetime_views,
            lifetime_clones: 20,
            two_week_views: 0,
            two_week_clones: 0,
            views_series: Vec::new(),
            clones_series: Vec::new(),
            last_checked: Utc::now(),
            is_selected: true,
        }
    }

    #[test]
    fn bootstrap_takes_lifetime_from_first_window() {
        let totals = accumulate(None, &views(60, &[40, 20]), &clones(8, &[5, 3]));

        assert_eq!(totals.two_week_views, 60);
        assert_eq!(totals.lifetime_views, 60);
        assert_eq!(totals.two_week_clones, 8);
        assert_eq!(totals.lifetime_clones, 8);
    }

    #[test]
    fn steady_state_adds_rolling_growth() {
        let prev = previous(50, 50);
        let totals = accumulate(Some(&prev), &views(60, &[30, 30]), &clones(12, &[6, 6]));

        assert_eq!(totals.lifetime_views, 60); // 50 + (60 - 50)
        assert_eq!(totals.lifetime_clones, 22); // 20 + (12 - 10)
        assert_eq!(totals.total_views, 60);
    }

    #[test]
    fn shrinking_window_clamps_delta_to_zero() {
        let prev = previous(50, 120);
        let totals = accumulate(Some(&prev), &views(35, &[35]), &clones(4, &[4]));

        // Rolling count dropped 50 -> 35; lifetime must not move.
        assert_eq!(totals.lifetime_views, 120);
        assert_eq!(totals.lifetime_clones, 20);
    }

    #[test]
    fn delta_uses_rolling_total_not_two_week_sum() {
        // Rolling count and window sum disagree (they can: GitHub's `count`
        // is computed server-side). The delta must follow the rolling count.
        let prev = previous(50, 100);
        let totals = accumulate(Some(&prev), &views(55, &[99, 99]), &clones(10, &[]));

        assert_eq!(totals.lifetime_views, 105); // 100 + (55 - 50), not + sum
        assert_eq!(totals.two_week_views, 198);
    }

    #[test]
    fn lifetime_is_non_decreasing_over_many_passes() {
        let mut prev: Option<RepositorySnapshot> = None;
        let mut last_lifetime = 0;

        for rolling in [10u64, 25, 25, 17, 40, 3, 90] {
            let totals = accumulate(prev.as_ref(), &views(rolling, &[rolling]), &clones(0, &[]));
            assert!(totals.lifetime_views >= last_lifetime);
            last_lifetime = totals.lifetime_views;

            let mut snap = previous(totals.total_views, totals.lifetime_views);
            snap.total_clones = totals.total_clones;
            snap.lifetime_clones = totals.lifetime_clones;
            prev = Some(snap);
        }
    }

    #[test]
    fn degraded_carries_lifetime_forward() {
        let prev = previous(50, 120);
        let totals = degraded(Some(&prev));

        assert_eq!(totals.lifetime_views, 120);
        assert_eq!(totals.lifetime_clones, 20);
        assert_eq!(totals.two_week_views, 0);
        assert_eq!(totals.total_views, 0);
    }

    #[test]
    fn degraded_without_history_is_all_zero() {
        assert_eq!(degraded(None), TrafficTotals::default());
    }
}
