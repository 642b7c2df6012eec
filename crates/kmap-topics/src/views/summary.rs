//! One-line corpus summary.

use serde::Serialize;

use crate::config::ThreadsConfig;
use crate::types::TopicGraph;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Occurring topics
    pub topics: usize,
    pub threads: usize,
    pub orphans: usize,
    pub total_mentions: u64,
}

pub fn summary(graph: &TopicGraph, threads: &ThreadsConfig) -> Summary {
    graph.iter().fold(Summary::default(), |mut acc, (_, state)| {
        acc.topics += 1;
        acc.total_mentions += state.mentions;
        match state.day_count() {
            1 => acc.orphans += 1,
            d if d >= threads.min_days => acc.threads += 1,
            _ => {}
        }
        acc
    })
}
