//! # kmap-topics
//!
//! Topic extraction and co-occurrence analysis over a personal notes corpus.
//!
//! A curated [`EntityRegistry`](kmap_types::EntityRegistry) is compiled once
//! into a [`TopicExtractor`]. The [`GraphBuilder`] runs it over every
//! document and every heading section, producing a [`TopicGraph`] of
//! mention counts, active days and shared-section weights. The views then
//! read that graph without modifying it.
//!
//! ## Views
//! - Overview: topics ranked by mentions, grouped by type
//! - Deep dive: one topic's days, section titles, partners and activity
//! - Threads and orphans: recurring versus one-day topics
//! - Connections and timeline: strongest pairs, weekly presence
//! - Clusters: strong-edge components with hub suppression
//! - Drift: last window against the one before
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kmap_topics::{views, GraphBuilder, TopicsConfig};
//! use kmap_types::{Document, EntityRegistry};
//!
//! let builder = GraphBuilder::new(&EntityRegistry::builtin()).unwrap();
//! let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
//! let graph = builder.build(&[Document::dated("2026-01-05.md", day, "## Hosting\nvercel and supabase")]);
//!
//! let summary = views::summary(&graph, &TopicsConfig::default().threads);
//! assert_eq!(summary.topics, 2);
//! assert_eq!(summary.orphans, 2);
//! ```

pub mod builder;
pub mod config;
pub mod dates;
pub mod error;
pub mod extraction;
pub mod sections;
pub mod types;
pub mod views;

pub use builder::GraphBuilder;
pub use config::{
    ClusterConfig, ConnectionsConfig, DeepDiveConfig, DriftConfig, OrphansConfig, OverviewConfig,
    ThreadsConfig, TimelineConfig, TopicsConfig,
};
pub use error::TopicsError;
pub use extraction::TopicExtractor;
pub use sections::{segment, Section};
pub use types::{Connection, Link, SectionOccurrence, TopicGraph, TopicState};
pub use views::ViewEngine;
