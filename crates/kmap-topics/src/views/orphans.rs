//! Orphans: topics mentioned on exactly one day and never revisited.

use chrono::NaiveDate;
use kmap_types::{EntityType, TopicId};
use serde::Serialize;

use crate::config::OrphansConfig;
use crate::dates::days_between;
use crate::types::TopicGraph;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Orphan {
    pub topic: TopicId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub date: NaiveDate,
    pub age_days: i64,
    pub mentions: u64,
    /// Distinct section titles the topic appeared under
    pub context: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Orphans {
    /// Young enough to be worth following up, newest first
    pub recent: Vec<Orphan>,
    /// Probably resolved or irrelevant, newest first
    pub older: Vec<Orphan>,
}

impl Orphans {
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.older.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recent.len() + self.older.len()
    }
}

pub fn orphans(graph: &TopicGraph, today: NaiveDate, config: &OrphansConfig) -> Orphans {
    let mut all: Vec<Orphan> = graph
        .iter()
        .filter(|(_, state)| state.day_count() == 1)
        .filter_map(|(topic, state)| {
            let date = state.first_date()?;
            let mut context: Vec<String> = Vec::new();
            for occurrence in &state.sections {
                if context.len() >= config.max_context {
                    break;
                }
                if !context.contains(&occurrence.title) {
                    context.push(occurrence.title.clone());
                }
            }
            Some(Orphan {
                topic: topic.clone(),
                entity_type: state.entity_type,
                date,
                age_days: days_between(date, today),
                mentions: state.mentions,
                context,
            })
        })
        .collect();

    all.sort_by(|a, b| a.age_days.cmp(&b.age_days).then_with(|| a.topic.cmp(&b.topic)));

    let (recent, older): (Vec<Orphan>, Vec<Orphan>) = all
        .into_iter()
        .partition(|o| o.age_days <= config.recent_days);
    Orphans { recent, older }
}
