//! Threads: topics that keep coming back across several days.

use chrono::NaiveDate;
use kmap_types::{EntityType, TopicId};
use serde::Serialize;

use crate::config::ThreadsConfig;
use crate::dates::{day_range, days_between};
use crate::types::TopicGraph;

/// How recently a thread was last touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ThreadStatus {
    Active,
    Recent,
    Stale { days: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thread {
    pub topic: TopicId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Distinct days mentioned
    pub days: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Days from first to last mention
    pub span_days: i64,
    pub days_since_last: i64,
    pub status: ThreadStatus,
    /// One flag per calendar day over the span, most recent days only
    pub strip: Vec<bool>,
    pub partners: Vec<TopicId>,
}

/// Topics seen on at least `min_days` distinct days, most days first.
pub fn threads(graph: &TopicGraph, today: NaiveDate, config: &ThreadsConfig) -> Vec<Thread> {
    let mut threads: Vec<Thread> = graph
        .iter()
        .filter(|(_, state)| state.day_count() >= config.min_days)
        .filter_map(|(topic, state)| {
            let first = state.first_date()?;
            let last = state.last_date()?;
            let since = days_between(last, today);

            let mut strip: Vec<bool> = day_range(first, last)
                .map(|d| state.dates.contains(&d))
                .collect();
            if strip.len() > config.strip_max_days {
                let excess = strip.len() - config.strip_max_days;
                strip.drain(..excess);
            }

            Some(Thread {
                topic: topic.clone(),
                entity_type: state.entity_type,
                days: state.day_count(),
                first_date: first,
                last_date: last,
                span_days: days_between(first, last),
                days_since_last: since,
                status: classify(since, config),
                strip,
                partners: state
                    .top_links(config.max_partners)
                    .into_iter()
                    .map(|l| l.topic)
                    .collect(),
            })
        })
        .collect();

    threads.sort_by(|a, b| b.days.cmp(&a.days).then_with(|| a.topic.cmp(&b.topic)));
    threads
}

fn classify(days_since_last: i64, config: &ThreadsConfig) -> ThreadStatus {
    if days_since_last <= config.active_days {
        ThreadStatus::Active
    } else if days_since_last <= config.recent_days {
        ThreadStatus::Recent
    } else {
        ThreadStatus::Stale {
            days: days_since_last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let config = ThreadsConfig::default();
        assert_eq!(classify(0, &config), ThreadStatus::Active);
        assert_eq!(classify(2, &config), ThreadStatus::Active);
        assert_eq!(classify(3, &config), ThreadStatus::Recent);
        assert_eq!(classify(7, &config), ThreadStatus::Recent);
        assert_eq!(classify(8, &config), ThreadStatus::Stale { days: 8 });
    }

    #[test]
    fn test_future_dates_count_as_active() {
        let config = ThreadsConfig::default();
        assert_eq!(classify(-3, &config), ThreadStatus::Active);
    }
}
