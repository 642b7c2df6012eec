//! Read-only analyses over a built [`TopicGraph`].
//!
//! Every view is a pure function of the graph, its config section and, for
//! the recency views, an explicit `today`. [`ViewEngine`] bundles those
//! inputs for callers that render several views from one graph.

pub mod clusters;
pub mod connections;
pub mod deep_dive;
pub mod drift;
pub mod export;
pub mod orphans;
pub mod overview;
pub mod summary;
pub mod threads;
pub mod timeline;

use chrono::NaiveDate;

use crate::config::TopicsConfig;
use crate::extraction::TopicExtractor;
use crate::types::{Connection, TopicGraph};

pub use clusters::{clusters, Cluster, ClusterMap, ClusterReport, Hub, Peripheral};
pub use connections::connections;
pub use deep_dive::{deep_dive, Activity, DayEntry, DeepDive, TopicDetail};
pub use drift::{drift, DriftEntry, DriftReport, DriftTrend};
pub use export::{export, GraphExport, TopicExport};
pub use orphans::{orphans, Orphan, Orphans};
pub use overview::{overview, Overview, OverviewRow, TypeGroup};
pub use summary::{summary, Summary};
pub use threads::{threads, Thread, ThreadStatus};
pub use timeline::{timeline, Timeline, TimelineWeek};

/// A graph with everything needed to render any view of it.
pub struct ViewEngine<'a> {
    graph: &'a TopicGraph,
    extractor: &'a TopicExtractor,
    config: &'a TopicsConfig,
    today: NaiveDate,
}

impl<'a> ViewEngine<'a> {
    pub fn new(
        graph: &'a TopicGraph,
        extractor: &'a TopicExtractor,
        config: &'a TopicsConfig,
        today: NaiveDate,
    ) -> Self {
        Self {
            graph,
            extractor,
            config,
            today,
        }
    }

    pub fn overview(&self) -> Overview {
        overview(self.graph, &self.config.overview)
    }

    pub fn deep_dive(&self, query: &str) -> DeepDive {
        deep_dive(
            self.graph,
            self.extractor,
            query,
            self.today,
            &self.config.deep_dive,
        )
    }

    pub fn threads(&self) -> Vec<Thread> {
        threads(self.graph, self.today, &self.config.threads)
    }

    pub fn orphans(&self) -> Orphans {
        orphans(self.graph, self.today, &self.config.orphans)
    }

    /// Strongest pairs; `limit` overrides the configured count.
    pub fn connections(&self, limit: Option<usize>) -> Vec<Connection> {
        connections(
            self.graph,
            limit.unwrap_or(self.config.connections.limit),
        )
    }

    /// Weekly matrix; `max_topics` overrides the configured column count.
    pub fn timeline(&self, max_topics: Option<usize>) -> Timeline {
        let mut config = self.config.timeline.clone();
        if let Some(max_topics) = max_topics {
            config.max_topics = max_topics;
        }
        timeline(self.graph, &self.config.threads, &config)
    }

    pub fn clusters(&self) -> ClusterReport {
        clusters(self.graph, &self.config.clusters)
    }

    pub fn drift(&self) -> DriftReport {
        drift(self.graph, self.today, &self.config.drift)
    }

    pub fn summary(&self) -> Summary {
        summary(self.graph, &self.config.threads)
    }

    pub fn export(&self) -> GraphExport {
        export(self.graph)
    }
}
