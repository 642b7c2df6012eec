//! Week-by-week presence of the busiest threads.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use kmap_types::TopicId;
use serde::Serialize;

use crate::config::{ThreadsConfig, TimelineConfig};
use crate::dates::week_start;
use crate::types::TopicGraph;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    /// Column order: highest-mention threads first
    pub topics: Vec<TopicId>,
    /// Rows in chronological order
    pub weeks: Vec<TimelineWeek>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineWeek {
    /// Monday of the ISO week
    pub week_start: NaiveDate,
    /// One flag per column of [`Timeline::topics`]
    pub present: Vec<bool>,
}

/// A topic is present in a week if any dated document of that week mentions it.
/// Every week with at least one dated document gets a row, even an empty one.
pub fn timeline(
    graph: &TopicGraph,
    threads: &ThreadsConfig,
    config: &TimelineConfig,
) -> Timeline {
    let mut columns: Vec<_> = graph
        .iter()
        .filter(|(_, state)| state.day_count() >= threads.min_days)
        .collect();
    columns.sort_by(|(a_id, a), (b_id, b)| b.mentions.cmp(&a.mentions).then_with(|| a_id.cmp(b_id)));
    columns.truncate(config.max_topics);

    let column_weeks: Vec<BTreeSet<NaiveDate>> = columns
        .iter()
        .map(|(_, state)| state.dates.iter().map(|d| week_start(*d)).collect())
        .collect();

    let all_weeks: BTreeSet<NaiveDate> = graph
        .document_dates()
        .iter()
        .map(|d| week_start(*d))
        .collect();

    let weeks = all_weeks
        .into_iter()
        .map(|week| TimelineWeek {
            week_start: week,
            present: column_weeks.iter().map(|w| w.contains(&week)).collect(),
        })
        .collect();

    Timeline {
        topics: columns.into_iter().map(|(id, _)| id.clone()).collect(),
        weeks,
    }
}
