//! Graph invariants over randomly generated corpora.
//!
//! Corpora are generated from a fixed seed so failures are reproducible.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use kmap_topics::views::{self, ClusterReport};
use kmap_topics::{GraphBuilder, TopicGraph, TopicsConfig};
use kmap_types::{Document, EntityRegistry};

const WORDS: &[&str] = &[
    "supabase", "vercel", "RLS", "stripe", "react", "Next.js", "tailwind", "oauth",
    "pipeline", "leads", "campaign", "webhooks", "ron", "anna", "ventok", "anivia",
    "the", "fixed", "deploy", "broken", "shipped", "today", "with", "and", "notes",
];

fn random_corpus(seed: u64, documents: usize) -> Vec<Document> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

    (0..documents)
        .map(|i| {
            let mut text = String::from("# Daily log\n");
            for s in 0..rng.random_range(1..5) {
                let heading = if rng.random_bool(0.3) { "###" } else { "##" };
                text.push_str(&format!("{} Entry {}\n", heading, s));
                for _ in 0..rng.random_range(3..20) {
                    text.push_str(WORDS[rng.random_range(0..WORDS.len())]);
                    text.push(' ');
                }
                text.push('\n');
            }
            if i % 7 == 6 {
                Document::undated("MEMORY.md", text)
            } else {
                let date = start + Duration::days(rng.random_range(0..60));
                Document::dated(format!("{}.md", date), date, text)
            }
        })
        .collect()
}

fn builder() -> GraphBuilder {
    GraphBuilder::new(&EntityRegistry::builtin()).unwrap()
}

#[test]
fn test_mentions_equal_sum_of_match_counts() {
    let docs = random_corpus(7, 40);
    let builder = builder();
    let graph = builder.build(&docs);

    for (topic, state) in graph.iter() {
        let expected: u64 = docs
            .iter()
            .map(|d| builder.extractor().count_matches(topic, &d.text))
            .sum();
        assert_eq!(state.mentions, expected, "mentions of {}", topic);
    }
}

#[test]
fn test_cooccurrence_is_symmetric() {
    let graph = builder().build(&random_corpus(11, 40));
    for (a, state) in graph.iter() {
        assert!(!state.cooccurrence.contains_key(a));
        for (b, weight) in &state.cooccurrence {
            assert_eq!(graph.weight(b, a), *weight, "{} <-> {}", a, b);
        }
    }
}

#[test]
fn test_dates_come_from_dated_extractions() {
    let docs = random_corpus(23, 40);
    let builder = builder();
    let graph = builder.build(&docs);

    for (topic, state) in graph.iter() {
        let expected: std::collections::BTreeSet<NaiveDate> = docs
            .iter()
            .filter(|d| builder.extractor().extract(&d.text).contains(topic))
            .filter_map(|d| d.date)
            .collect();
        assert_eq!(state.dates, expected, "dates of {}", topic);
    }
}

#[test]
fn test_merge_fold_equals_build() {
    let docs = random_corpus(31, 30);
    let builder = builder();

    let built = builder.build(&docs);
    let folded = docs.iter().fold(TopicGraph::new(), |mut acc, doc| {
        acc.merge(builder.build_document(doc));
        acc
    });
    assert_eq!(built, folded);
}

#[test]
fn test_identical_input_renders_identically() {
    let docs = random_corpus(5, 30);
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let config = TopicsConfig::default();

    let render = |graph: &TopicGraph| {
        let builder = builder();
        let engine = kmap_topics::ViewEngine::new(graph, builder.extractor(), &config, today);
        serde_json::to_string(&(
            engine.overview(),
            engine.threads(),
            engine.orphans(),
            engine.connections(None),
            engine.timeline(None),
            engine.clusters(),
            engine.drift(),
            engine.summary(),
            engine.export(),
            engine.deep_dive("supabase"),
        ))
        .unwrap()
    };

    let first = render(&builder().build(&docs));
    let second = render(&builder().build(&docs));
    assert_eq!(first, second);
}

#[test]
fn test_document_order_only_changes_section_order() {
    let docs = random_corpus(13, 30);
    let mut shuffled = docs.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(99));

    let builder = builder();
    let a = builder.build(&docs);
    let b = builder.build(&shuffled);

    assert_eq!(a.connections(), b.connections());
    assert_eq!(a.document_dates(), b.document_dates());
    for (topic, state) in a.iter() {
        let other = b.get(topic).unwrap();
        assert_eq!(state.mentions, other.mentions);
        assert_eq!(state.dates, other.dates);
        assert_eq!(state.sections.len(), other.sections.len());
    }
}

#[test]
fn test_cluster_invariants() {
    let config = TopicsConfig::default();
    for seed in 0..8 {
        let graph = builder().build(&random_corpus(seed, 60));
        let ClusterReport::Clustered(map) = views::clusters(&graph, &config.clusters) else {
            continue;
        };

        assert!(map.threshold >= config.clusters.min_threshold);
        assert!(map.hub_threshold >= config.clusters.hub_floor);

        let hubs: Vec<&String> = map.hubs.iter().map(|h| &h.topic).collect();
        for hub in &map.hubs {
            assert!(hub.degree > map.hub_threshold);
        }

        let mut seen = std::collections::BTreeSet::new();
        for cluster in &map.clusters {
            assert!(cluster.size >= 2);
            assert_eq!(cluster.members().count(), cluster.size);
            for member in cluster.members() {
                assert!(graph.get(member).unwrap().day_count() >= config.clusters.min_days);
                assert!(!hubs.contains(&member));
                assert!(seen.insert(member.clone()), "{} in two clusters", member);
            }
        }
        for peripheral in &map.peripheral {
            assert!(!seen.contains(&peripheral.topic));
            assert!(!hubs.contains(&&peripheral.topic));
        }

        let sizes: Vec<usize> = map.clusters.iter().map(|c| c.size).collect();
        let mut sorted = sizes.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sizes, sorted);
    }
}
