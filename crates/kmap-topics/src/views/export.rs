//! Raw graph dump for downstream tooling.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use kmap_types::{EntityType, TopicId};
use serde::Serialize;

use crate::types::{SectionOccurrence, TopicGraph};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphExport {
    pub document_count: usize,
    pub document_dates: BTreeSet<NaiveDate>,
    pub topics: BTreeMap<TopicId, TopicExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicExport {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub mentions: u64,
    pub days: usize,
    pub dates: Vec<NaiveDate>,
    pub cooccurrences: BTreeMap<TopicId, u32>,
    pub sections: Vec<SectionOccurrence>,
}

pub fn export(graph: &TopicGraph) -> GraphExport {
    let topics = graph
        .iter()
        .map(|(topic, state)| {
            (
                topic.clone(),
                TopicExport {
                    entity_type: state.entity_type,
                    mentions: state.mentions,
                    days: state.day_count(),
                    dates: state.dates.iter().copied().collect(),
                    cooccurrences: state.cooccurrence.clone(),
                    sections: state.sections.clone(),
                },
            )
        })
        .collect();

    GraphExport {
        document_count: graph.document_count(),
        document_dates: graph.document_dates().clone(),
        topics,
    }
}
