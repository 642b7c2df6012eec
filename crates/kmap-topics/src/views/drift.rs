//! Drift: what is rising and what is fading, last window vs the one before.

use chrono::{Duration, NaiveDate};
use kmap_types::TopicId;
use serde::Serialize;

use crate::config::DriftConfig;
use crate::types::TopicGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftTrend {
    Rising,
    Stable,
    Fading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftEntry {
    pub topic: TopicId,
    /// Days mentioned in the last window
    pub recent: usize,
    /// Days mentioned in the window before that
    pub previous: usize,
    pub delta: i64,
    pub trend: DriftTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftReport {
    pub window_days: i64,
    /// Sorted by delta, largest rise first
    pub entries: Vec<DriftEntry>,
}

/// Compare `[today - w, ..)` against `[today - 2w, today - w)`.
///
/// Topics absent from both windows are left out. Window starts that fall
/// before the earliest representable date are clamped to it.
pub fn drift(graph: &TopicGraph, today: NaiveDate, config: &DriftConfig) -> DriftReport {
    let window = config.window_days.max(0);
    let recent_start = days_before(today, window);
    let previous_start = days_before(today, window.saturating_mul(2));

    let mut entries: Vec<DriftEntry> = graph
        .iter()
        .filter_map(|(topic, state)| {
            let recent = state.dates.range(recent_start..).count();
            let previous = state.dates.range(previous_start..recent_start).count();
            if recent == 0 && previous == 0 {
                return None;
            }
            let delta = recent as i64 - previous as i64;
            let trend = match delta {
                d if d > 0 => DriftTrend::Rising,
                0 => DriftTrend::Stable,
                _ => DriftTrend::Fading,
            };
            Some(DriftEntry {
                topic: topic.clone(),
                recent,
                previous,
                delta,
                trend,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.delta.cmp(&a.delta).then_with(|| a.topic.cmp(&b.topic)));

    DriftReport {
        window_days: config.window_days,
        entries,
    }
}

fn days_before(today: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| today.checked_sub_signed(delta))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_before_clamps_huge_window() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        assert_eq!(days_before(today, 7), NaiveDate::from_ymd_opt(2026, 2, 8).unwrap());
        assert_eq!(days_before(today, 100_000_000), NaiveDate::MIN);
        assert_eq!(days_before(today, i64::MAX), NaiveDate::MIN);
    }
}
