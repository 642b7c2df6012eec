//! Strongest co-occurring pairs across the whole graph.

use crate::types::{Connection, TopicGraph};

/// Every pair with a shared section, listed once, heaviest first.
///
/// Ties are broken by the pair's ids so the listing never depends on the
/// order documents were folded in.
pub fn connections(graph: &TopicGraph, limit: usize) -> Vec<Connection> {
    let mut pairs = graph.connections();
    pairs.sort_by(|x, y| {
        y.weight
            .cmp(&x.weight)
            .then_with(|| x.a.cmp(&y.a))
            .then_with(|| x.b.cmp(&y.b))
    });
    pairs.truncate(limit);
    pairs
}
