//! Deep dive into a single topic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use kmap_types::{EntityType, TopicId};
use serde::Serialize;

use crate::config::DeepDiveConfig;
use crate::dates::days_between;
use crate::extraction::TopicExtractor;
use crate::types::{Link, TopicGraph};

/// Outcome of resolving and describing a topic query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeepDive {
    /// Query matched no id or alias
    NotFound {
        query: String,
        /// Topics that do occur in the corpus
        suggestions: Vec<TopicId>,
    },
    /// Query resolved, but the topic never occurs in the corpus
    NoMentions {
        topic: TopicId,
        #[serde(rename = "type")]
        entity_type: EntityType,
    },
    Found(TopicDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicDetail {
    pub topic: TopicId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub mentions: u64,
    pub days: usize,
    /// One entry per dated day, chronological
    pub timeline: Vec<DayEntry>,
    /// Co-occurrence partners, heaviest first
    pub partners: Vec<Link>,
    /// Only present with two or more dated days
    pub activity: Option<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    /// Distinct section titles of that day; empty if only mentioned in body text
    pub titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    pub mean_gap_days: f64,
    pub max_gap_days: i64,
    pub days_since_last: i64,
    /// Silent for more than twice the usual gap, and for over a week
    pub going_cold: bool,
}

/// Resolve `query` by exact id or alias (case-insensitive) and describe it.
pub fn deep_dive(
    graph: &TopicGraph,
    extractor: &TopicExtractor,
    query: &str,
    today: NaiveDate,
    config: &DeepDiveConfig,
) -> DeepDive {
    let Some(topic) = extractor.resolve(query) else {
        return DeepDive::NotFound {
            query: query.to_string(),
            suggestions: graph.topic_ids(),
        };
    };

    let Some(state) = graph.get(topic) else {
        return match extractor.entity_type(topic) {
            Some(entity_type) => DeepDive::NoMentions {
                topic: topic.clone(),
                entity_type,
            },
            None => DeepDive::NotFound {
                query: query.to_string(),
                suggestions: graph.topic_ids(),
            },
        };
    };

    let mut titles_by_day: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for occurrence in &state.sections {
        let Some(date) = occurrence.date else {
            continue;
        };
        let titles = titles_by_day.entry(date).or_default();
        if titles.len() < config.max_titles_per_day && !titles.contains(&occurrence.title) {
            titles.push(occurrence.title.clone());
        }
    }

    let timeline = state
        .dates
        .iter()
        .map(|date| DayEntry {
            date: *date,
            titles: titles_by_day.remove(date).unwrap_or_default(),
        })
        .collect();

    DeepDive::Found(TopicDetail {
        topic: topic.clone(),
        entity_type: state.entity_type,
        mentions: state.mentions,
        days: state.day_count(),
        timeline,
        partners: state.top_links(config.max_partners),
        activity: activity(&state.dates.iter().copied().collect::<Vec<_>>(), today, config),
    })
}

fn activity(dates: &[NaiveDate], today: NaiveDate, config: &DeepDiveConfig) -> Option<Activity> {
    let (first, last) = match dates {
        [first, .., last] => (*first, *last),
        _ => return None,
    };

    let gaps: Vec<i64> = dates
        .windows(2)
        .map(|pair| days_between(pair[0], pair[1]))
        .collect();
    let mean_gap = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    let max_gap = gaps.iter().copied().max().unwrap_or(0);
    let since = days_between(last, today);

    Some(Activity {
        first_seen: first,
        last_seen: last,
        mean_gap_days: mean_gap,
        max_gap_days: max_gap,
        days_since_last: since,
        going_cold: since as f64 > 2.0 * mean_gap && since > config.cold_after_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn test_activity_needs_two_days() {
        let config = DeepDiveConfig::default();
        assert!(activity(&[], day(10), &config).is_none());
        assert!(activity(&[day(1)], day(10), &config).is_none());
    }

    #[test]
    fn test_activity_gaps() {
        let config = DeepDiveConfig::default();
        let a = activity(&[day(1), day(2), day(5)], day(6), &config).unwrap();
        assert!((a.mean_gap_days - 2.0).abs() < f64::EPSILON);
        assert_eq!(a.max_gap_days, 3);
        assert_eq!(a.days_since_last, 1);
        assert!(!a.going_cold);
    }

    #[test]
    fn test_going_cold() {
        let config = DeepDiveConfig::default();
        // mean gap 1 day, silent for 9 days
        let a = activity(&[day(1), day(2), day(3)], day(12), &config).unwrap();
        assert!(a.going_cold);

        // silent for 7 days is never cold, however regular the topic was
        let a = activity(&[day(1), day(2), day(3)], day(10), &config).unwrap();
        assert!(!a.going_cold);

        // long but typical silence
        let a = activity(&[day(1), day(11), day(21)], day(30), &config).unwrap();
        assert!(!a.going_cold);
    }
}
