//! Leaderboard of every occurring topic, grouped by entity type.

use chrono::NaiveDate;
use kmap_types::{EntityType, TopicId};
use serde::Serialize;

use crate::config::OverviewConfig;
use crate::types::TopicGraph;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// Occurring topics
    pub topic_count: usize,
    /// Distinct days on which any topic appeared
    pub day_count: usize,
    pub groups: Vec<TypeGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeGroup {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub topics: Vec<OverviewRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub topic: TopicId,
    pub mentions: u64,
    pub days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Strongest section-level partners
    pub links: Vec<TopicId>,
}

/// Rank topics by document-level mentions; links come from section-level
/// co-occurrence. Groups appear in order of their best-ranked topic.
pub fn overview(graph: &TopicGraph, config: &OverviewConfig) -> Overview {
    let mut ranked: Vec<_> = graph.iter().collect();
    ranked.sort_by(|(a_id, a), (b_id, b)| b.mentions.cmp(&a.mentions).then_with(|| a_id.cmp(b_id)));

    let mut groups: Vec<TypeGroup> = Vec::new();
    let mut all_days = std::collections::BTreeSet::new();

    for (topic, state) in ranked {
        all_days.extend(state.dates.iter().copied());

        let row = OverviewRow {
            topic: topic.clone(),
            mentions: state.mentions,
            days: state.day_count(),
            first_date: state.first_date(),
            last_date: state.last_date(),
            links: state
                .top_links(config.max_links)
                .into_iter()
                .map(|l| l.topic)
                .collect(),
        };

        match groups.iter_mut().find(|g| g.entity_type == state.entity_type) {
            Some(group) => group.topics.push(row),
            None => groups.push(TypeGroup {
                entity_type: state.entity_type,
                topics: vec![row],
            }),
        }
    }

    Overview {
        topic_count: graph.len(),
        day_count: all_days.len(),
        groups,
    }
}
