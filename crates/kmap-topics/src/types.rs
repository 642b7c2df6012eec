//! Topic graph data types.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use kmap_types::{EntityType, TopicId};
use serde::{Deserialize, Serialize};

/// One section in which a topic appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOccurrence {
    /// Day of the containing document (None for undated documents)
    pub date: Option<NaiveDate>,
    /// Section heading
    pub title: String,
    /// Heading level (2 or 3)
    pub level: u8,
}

/// Accumulated state of one topic across the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicState {
    /// Entity kind from the registry
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Days of dated documents mentioning the topic
    pub dates: BTreeSet<NaiveDate>,
    /// Total alias matches over all documents
    pub mentions: u64,
    /// Every section the topic appeared in, in corpus order
    pub sections: Vec<SectionOccurrence>,
    /// Other topic -> number of shared sections
    pub cooccurrence: BTreeMap<TopicId, u32>,
}

impl TopicState {
    /// Create an empty state.
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            dates: BTreeSet::new(),
            mentions: 0,
            sections: Vec::new(),
            cooccurrence: BTreeMap::new(),
        }
    }

    /// Number of distinct days the topic was mentioned on.
    pub fn day_count(&self) -> usize {
        self.dates.len()
    }

    /// First day the topic was mentioned.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.iter().next().copied()
    }

    /// Last day the topic was mentioned.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.iter().next_back().copied()
    }

    /// Strongest co-occurrence partners, heaviest first, ties by id.
    pub fn top_links(&self, limit: usize) -> Vec<Link> {
        let mut links: Vec<Link> = self
            .cooccurrence
            .iter()
            .filter(|(_, w)| **w > 0)
            .map(|(topic, weight)| Link {
                topic: topic.clone(),
                weight: *weight,
            })
            .collect();
        links.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.topic.cmp(&b.topic)));
        links.truncate(limit);
        links
    }

    fn absorb(&mut self, other: TopicState) {
        self.dates.extend(other.dates);
        self.mentions += other.mentions;
        self.sections.extend(other.sections);
        for (topic, weight) in other.cooccurrence {
            *self.cooccurrence.entry(topic).or_insert(0) += weight;
        }
    }
}

/// A weighted neighbor of some topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub topic: TopicId,
    pub weight: u32,
}

/// An undirected weighted pair, stored with `a < b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub a: TopicId,
    pub b: TopicId,
    pub weight: u32,
}

impl Connection {
    /// Create a pair in canonical order.
    pub fn new(x: &str, y: &str, weight: u32) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self {
            a: a.to_string(),
            b: b.to_string(),
            weight,
        }
    }
}

/// The co-occurrence graph of one corpus.
///
/// Built once per run and read-only afterwards; every view borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGraph {
    topics: BTreeMap<TopicId, TopicState>,
    document_dates: BTreeSet<NaiveDate>,
    document_count: usize,
}

impl TopicGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of one topic, if it occurred at all.
    pub fn get(&self, topic: &str) -> Option<&TopicState> {
        self.topics.get(topic)
    }

    /// Check if a topic occurred.
    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Occurring topics in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, &TopicState)> {
        self.topics.iter()
    }

    /// Ids of occurring topics in id order.
    pub fn topic_ids(&self) -> Vec<TopicId> {
        self.topics.keys().cloned().collect()
    }

    /// Number of occurring topics.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Check if no topic occurred.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Days of every dated document, including ones without topics.
    pub fn document_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.document_dates
    }

    /// Number of documents folded into the graph.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of sections shared by two topics.
    pub fn weight(&self, a: &str, b: &str) -> u32 {
        self.topics
            .get(a)
            .and_then(|s| s.cooccurrence.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Every pair with positive weight, once each, in id order.
    pub fn connections(&self) -> Vec<Connection> {
        self.topics
            .iter()
            .flat_map(|(a, state)| {
                state
                    .cooccurrence
                    .iter()
                    .filter(move |(b, w)| a.as_str() < b.as_str() && **w > 0)
                    .map(move |(b, w)| Connection::new(a, b, *w))
            })
            .collect()
    }

    /// Fold another partial graph into this one.
    ///
    /// Date sets are unioned and counters summed, so the result does not
    /// depend on merge order. Section occurrence lists are concatenated.
    pub fn merge(&mut self, other: TopicGraph) {
        for (topic, state) in other.topics {
            match self.topics.get_mut(&topic) {
                Some(existing) => existing.absorb(state),
                None => {
                    self.topics.insert(topic, state);
                }
            }
        }
        self.document_dates.extend(other.document_dates);
        self.document_count += other.document_count;
    }

    pub(crate) fn record_document(&mut self, date: Option<NaiveDate>) {
        self.document_count += 1;
        if let Some(date) = date {
            self.document_dates.insert(date);
        }
    }

    pub(crate) fn state_mut(&mut self, topic: &str, entity_type: EntityType) -> &mut TopicState {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| TopicState::new(entity_type))
    }

    /// Count one shared section for both directions of the pair.
    pub(crate) fn add_cooccurrence(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        for (from, to) in [(a, b), (b, a)] {
            if let Some(state) = self.topics.get_mut(from) {
                *state.cooccurrence.entry(to.to_string()).or_insert(0) += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn graph_with_pair() -> TopicGraph {
        let mut graph = TopicGraph::new();
        graph.state_mut("a", EntityType::Concept);
        graph.state_mut("b", EntityType::Tech);
        graph.add_cooccurrence("a", "b");
        graph.add_cooccurrence("b", "a");
        graph
    }

    #[test]
    fn test_add_cooccurrence_is_symmetric() {
        let graph = graph_with_pair();
        assert_eq!(graph.weight("a", "b"), 2);
        assert_eq!(graph.weight("b", "a"), 2);
    }

    #[test]
    fn test_add_cooccurrence_ignores_self() {
        let mut graph = TopicGraph::new();
        graph.state_mut("a", EntityType::Concept);
        graph.add_cooccurrence("a", "a");
        assert!(graph.get("a").unwrap().cooccurrence.is_empty());
    }

    #[test]
    fn test_connections_listed_once() {
        let graph = graph_with_pair();
        let pairs = graph.connections();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0], Connection::new("b", "a", 2));
        assert_eq!((pairs[0].a.as_str(), pairs[0].b.as_str()), ("a", "b"));
    }

    #[test]
    fn test_top_links_order() {
        let mut state = TopicState::new(EntityType::Concept);
        state.cooccurrence.insert("z".to_string(), 3);
        state.cooccurrence.insert("m".to_string(), 5);
        state.cooccurrence.insert("b".to_string(), 3);
        let links = state.top_links(2);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].topic, "m");
        assert_eq!(links[1].topic, "b");
    }

    #[test]
    fn test_first_and_last_date() {
        let mut state = TopicState::new(EntityType::Concept);
        assert!(state.first_date().is_none());
        state.dates.insert(day(5));
        state.dates.insert(day(1));
        state.dates.insert(day(3));
        assert_eq!(state.first_date(), Some(day(1)));
        assert_eq!(state.last_date(), Some(day(5)));
        assert_eq!(state.day_count(), 3);
    }

    #[test]
    fn test_merge_unions_and_sums() {
        let mut left = graph_with_pair();
        left.record_document(Some(day(1)));
        left.state_mut("a", EntityType::Concept).dates.insert(day(1));
        left.state_mut("a", EntityType::Concept).mentions = 2;

        let mut right = graph_with_pair();
        right.record_document(Some(day(2)));
        right.record_document(None);
        right.state_mut("a", EntityType::Concept).dates.insert(day(1));
        right.state_mut("a", EntityType::Concept).dates.insert(day(2));
        right.state_mut("a", EntityType::Concept).mentions = 3;
        right.state_mut("c", EntityType::Person).mentions = 1;

        left.merge(right);

        let a = left.get("a").unwrap();
        assert_eq!(a.mentions, 5);
        assert_eq!(a.day_count(), 2);
        assert_eq!(left.weight("a", "b"), 4);
        assert_eq!(left.weight("b", "a"), 4);
        assert!(left.contains("c"));
        assert_eq!(left.document_count(), 3);
        assert_eq!(left.document_dates().len(), 2);
    }
}
