//! Star and fork change detection.

use crate::model::RepositorySnapshot;

/// A notification-worthy change observed for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoEvent {
    /// Star count rose since the previous observation.
    StarIncrease { name: String, stars: u64 },
    /// Fork count rose since the previous observation.
    ForkIncrease { name: String, forks: u64 },
}

impl RepoEvent {
    #[must_use]
    pub fn repo_name(&self) -> &str {
        match self {
            Self::StarIncrease { name, .. } | Self::ForkIncrease { name, .. } => name,
        }
    }
}

/// Compare a fresh snapshot against the previously persisted one.
///
/// An event fires only on a strict increase; equal or lower counts stay
/// silent, as does the first observation (no baseline to compare). At most
/// one event per kind is produced regardless of the size of the jump.
#[must_use]
pub fn detect(
    previous: Option<&RepositorySnapshot>,
    current: &RepositorySnapshot,
) -> Vec<RepoEvent> {
    let Some(previous) = previous else {
        return Vec::new();
    };

    let mut events = Vec::with_capacity(2);

    if current.current_stars > previous.current_stars {
        events.push(RepoEvent::StarIncrease {
            name: current.name.clone(),
            stars: current.current_stars,
        });
    }

    if current.current_forks > previous.current_forks {
        events.push(RepoEvent::ForkIncrease {
            name: current.name.clone(),
            forks: current.current_forks,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(stars: u64, forks: u64) -> RepositorySnapshot {
        RepositorySnapshot {
            name: "me/a".into(),
            current_stars: stars,
            current_forks: forks,
            total_views: 0,
            total_clones: 0,
            lifetime_views: 0,
            lifetime_clones: 0,
            two_week_views: 0,
            two_week_clones: 0,
            views_series: Vec::new(),
            clones_series: Vec::new(),
            last_checked: Utc::now(),
            is_selected: true,
        }
    }

    #[test]
    fn first_observation_never_notifies() {
        assert!(detect(None, &snapshot(100, 50)).is_empty());
    }

    #[test]
    fn strict_increase_fires_one_event_per_kind() {
        let events = detect(Some(&snapshot(10, 2)), &snapshot(13, 2));
        assert_eq!(
            events,
            [RepoEvent::StarIncrease {
                name: "me/a".into(),
                stars: 13
            }]
        );

        let events = detect(Some(&snapshot(10, 2)), &snapshot(11, 3));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn equal_or_lower_counts_stay_silent() {
        assert!(detect(Some(&snapshot(10, 2)), &snapshot(10, 2)).is_empty());
        assert!(detect(Some(&snapshot(10, 2)), &snapshot(9, 1)).is_empty());
    }
}
