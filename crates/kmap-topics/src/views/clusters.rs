//! Clusters: tight groups of topics that keep showing up together.
//!
//! Candidates are topics seen on several days. Only the strongest edges
//! among them are kept, topics connected to too many others are set aside
//! as hubs, and the connected components of what remains are the clusters.

use std::collections::VecDeque;

use kmap_types::{EntityType, TopicId};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::ClusterConfig;
use crate::types::{Connection, Link, TopicGraph};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClusterReport {
    /// No candidates, or no edges among them
    NotEnoughData { candidates: usize },
    Clustered(ClusterMap),
}

impl ClusterReport {
    /// Clusters found, empty when there was not enough data.
    pub fn clusters(&self) -> &[Cluster] {
        match self {
            ClusterReport::NotEnoughData { .. } => &[],
            ClusterReport::Clustered(map) => &map.clusters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMap {
    /// Minimum shared sections for an edge to count
    pub threshold: u32,
    /// Degree above which a candidate is a hub
    pub hub_threshold: usize,
    pub candidates: usize,
    pub hubs: Vec<Hub>,
    /// Largest first
    pub clusters: Vec<Cluster>,
    pub peripheral: Vec<Peripheral>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hub {
    pub topic: TopicId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Strong connections among candidates
    pub degree: usize,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub size: usize,
    /// Most internally connected members
    pub core: Vec<TopicId>,
    pub also: Vec<TopicId>,
    pub strongest: Vec<Connection>,
}

impl Cluster {
    /// All members, core first.
    pub fn members(&self) -> impl Iterator<Item = &TopicId> {
        self.core.iter().chain(self.also.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Peripheral {
    pub topic: TopicId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub links: Vec<Link>,
}

/// Candidate arena: stable indices in id order and a dense weight table.
struct Arena<'a> {
    ids: Vec<&'a TopicId>,
    weights: Vec<u32>,
}

impl<'a> Arena<'a> {
    fn new(graph: &'a TopicGraph, min_days: usize) -> Self {
        let ids: Vec<&TopicId> = graph
            .iter()
            .filter(|(_, state)| state.day_count() >= min_days)
            .map(|(id, _)| id)
            .collect();
        let n = ids.len();
        let mut weights = vec![0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    weights[i * n + j] = graph.weight(ids[i], ids[j]);
                }
            }
        }
        Self { ids, weights }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn weight(&self, i: usize, j: usize) -> u32 {
        self.weights[i * self.len() + j]
    }

    /// Positive weights of each unordered pair, heaviest first.
    fn edge_weights(&self) -> Vec<u32> {
        let n = self.len();
        let mut weights: Vec<u32> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| self.weight(i, j))
            .filter(|w| *w > 0)
            .collect();
        weights.sort_unstable_by(|a, b| b.cmp(a));
        weights
    }
}

/// Group candidates into clusters of strongly co-occurring topics.
#[instrument(skip_all, fields(topics = graph.len()))]
pub fn clusters(graph: &TopicGraph, config: &ClusterConfig) -> ClusterReport {
    let arena = Arena::new(graph, config.min_days);
    let n = arena.len();

    let edge_weights = arena.edge_weights();
    if edge_weights.is_empty() {
        debug!(candidates = n, "No edges among candidates");
        return ClusterReport::NotEnoughData { candidates: n };
    }

    let threshold = percentile_threshold(&edge_weights, config);
    let hub_threshold = config
        .hub_floor
        .max((config.hub_fraction * n as f64).floor() as usize);

    // Strong edges among candidates
    let strong: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| {
                    let w = arena.weight(i, j);
                    w > 0 && w >= threshold
                })
                .collect()
        })
        .collect();

    let is_hub: Vec<bool> = strong.iter().map(|adj| adj.len() > hub_threshold).collect();

    // Same edges with every hub removed
    let hub_free: Vec<Vec<usize>> = strong
        .iter()
        .enumerate()
        .map(|(i, adj)| {
            if is_hub[i] {
                Vec::new()
            } else {
                adj.iter().copied().filter(|&j| !is_hub[j]).collect()
            }
        })
        .collect();

    debug!(
        candidates = n,
        threshold,
        hub_threshold,
        hubs = is_hub.iter().filter(|h| **h).count(),
        "Filtered adjacency built"
    );

    let mut visited = vec![false; n];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for start in 0..n {
        if visited[start] || is_hub[start] || hub_free[start].is_empty() {
            continue;
        }
        let component = bfs(start, &hub_free, &mut visited);
        if component.len() >= 2 {
            components.push(component);
        }
    }
    components.sort_by(|a, b| b.len().cmp(&a.len()));

    debug!(clusters = components.len(), "Components found");

    let entity_type = |i: usize| graph.get(arena.ids[i]).map(|s| s.entity_type);
    let top_links = |i: usize, limit: usize| {
        graph
            .get(arena.ids[i])
            .map(|s| s.top_links(limit))
            .unwrap_or_default()
    };

    let hubs = (0..n)
        .filter(|&i| is_hub[i])
        .filter_map(|i| {
            Some(Hub {
                topic: arena.ids[i].clone(),
                entity_type: entity_type(i)?,
                degree: strong[i].len(),
                links: top_links(i, config.hub_links),
            })
        })
        .collect();

    let peripheral = (0..n)
        .filter(|&i| !visited[i] && !is_hub[i])
        .filter_map(|i| {
            Some(Peripheral {
                topic: arena.ids[i].clone(),
                entity_type: entity_type(i)?,
                links: top_links(i, config.peripheral_links),
            })
        })
        .collect();

    let clusters = components
        .into_iter()
        .map(|members| describe(&arena, members, config))
        .collect();

    ClusterReport::Clustered(ClusterMap {
        threshold,
        hub_threshold,
        candidates: n,
        hubs,
        clusters,
        peripheral,
    })
}

/// `max(floor, weights[floor(len * percentile)])` with the index clamped.
fn percentile_threshold(sorted_desc: &[u32], config: &ClusterConfig) -> u32 {
    let Some(last) = sorted_desc.len().checked_sub(1) else {
        return config.min_threshold;
    };
    let idx = ((sorted_desc.len() as f64 * config.percentile).floor() as usize).min(last);
    config.min_threshold.max(sorted_desc[idx])
}

fn bfs(start: usize, adjacency: &[Vec<usize>], visited: &mut [bool]) -> Vec<usize> {
    let mut component = vec![start];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    while let Some(node) = queue.pop_front() {
        for &next in &adjacency[node] {
            if !visited[next] {
                visited[next] = true;
                component.push(next);
                queue.push_back(next);
            }
        }
    }
    component
}

fn describe(arena: &Arena<'_>, members: Vec<usize>, config: &ClusterConfig) -> Cluster {
    let internal = |i: usize| -> u64 { members.iter().map(|&j| u64::from(arena.weight(i, j))).sum() };

    let mut ranked: Vec<(usize, u64)> = members.iter().map(|&i| (i, internal(i))).collect();
    ranked.sort_by(|(a, wa), (b, wb)| wb.cmp(wa).then_with(|| arena.ids[*a].cmp(arena.ids[*b])));

    let mut edges: Vec<Connection> = Vec::new();
    for (pos, &i) in members.iter().enumerate() {
        for &j in &members[pos + 1..] {
            let w = arena.weight(i, j);
            if w > 0 {
                edges.push(Connection::new(arena.ids[i], arena.ids[j], w));
            }
        }
    }
    edges.sort_by(|x, y| {
        y.weight
            .cmp(&x.weight)
            .then_with(|| x.a.cmp(&y.a))
            .then_with(|| x.b.cmp(&y.b))
    });
    edges.truncate(config.top_edges);

    let mut names: Vec<TopicId> = ranked.into_iter().map(|(i, _)| arena.ids[i].clone()).collect();
    let also = names.split_off(config.core_size.min(names.len()));

    Cluster {
        size: members.len(),
        core: names,
        also,
        strongest: edges,
    }
}
