//! Topic view configuration.

use serde::{Deserialize, Serialize};

use crate::error::TopicsError;

/// Longest accepted drift window, about a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Master configuration for the topic views.
///
/// Every field has a serde default, so a partial `[topics]` table in the
/// config file only overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// Overview settings
    #[serde(default)]
    pub overview: OverviewConfig,

    /// Thread detection settings
    #[serde(default)]
    pub threads: ThreadsConfig,

    /// Orphan detection settings
    #[serde(default)]
    pub orphans: OrphansConfig,

    /// Connection listing settings
    #[serde(default)]
    pub connections: ConnectionsConfig,

    /// Weekly timeline settings
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Clustering settings
    #[serde(default)]
    pub clusters: ClusterConfig,

    /// Drift window settings
    #[serde(default)]
    pub drift: DriftConfig,

    /// Single-topic deep dive settings
    #[serde(default)]
    pub deep_dive: DeepDiveConfig,
}

impl TopicsConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), TopicsError> {
        if self.threads.min_days < 2 {
            return Err(TopicsError::InvalidConfig(format!(
                "threads.min_days must be >= 2, got {}",
                self.threads.min_days
            )));
        }
        if self.threads.strip_max_days == 0 {
            return Err(TopicsError::InvalidConfig(
                "threads.strip_max_days must be > 0".to_string(),
            ));
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&self.drift.window_days) {
            return Err(TopicsError::InvalidConfig(format!(
                "drift.window_days must be in [1, {}], got {}",
                MAX_WINDOW_DAYS, self.drift.window_days
            )));
        }
        if !(0.0..1.0).contains(&self.clusters.percentile) {
            return Err(TopicsError::InvalidConfig(format!(
                "clusters.percentile must be in [0.0, 1.0), got {}",
                self.clusters.percentile
            )));
        }
        if !(0.0..=1.0).contains(&self.clusters.hub_fraction) {
            return Err(TopicsError::InvalidConfig(format!(
                "clusters.hub_fraction must be in [0.0, 1.0], got {}",
                self.clusters.hub_fraction
            )));
        }
        if self.clusters.min_days == 0 {
            return Err(TopicsError::InvalidConfig(
                "clusters.min_days must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Overview configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewConfig {
    /// Co-occurrence partners listed per topic
    #[serde(default = "default_overview_links")]
    pub max_links: usize,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            max_links: default_overview_links(),
        }
    }
}

fn default_overview_links() -> usize {
    3
}

/// Thread configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadsConfig {
    /// Minimum distinct days for a topic to count as a thread
    #[serde(default = "default_thread_min_days")]
    pub min_days: usize,

    /// Presence strip is cut to the most recent N days
    #[serde(default = "default_strip_max_days")]
    pub strip_max_days: usize,

    /// Days since last mention still reported as active
    #[serde(default = "default_active_days")]
    pub active_days: i64,

    /// Days since last mention still reported as recent
    #[serde(default = "default_recent_days")]
    pub recent_days: i64,

    /// Co-occurrence partners listed per thread
    #[serde(default = "default_thread_partners")]
    pub max_partners: usize,
}

impl Default for ThreadsConfig {
    fn default() -> Self {
        Self {
            min_days: default_thread_min_days(),
            strip_max_days: default_strip_max_days(),
            active_days: default_active_days(),
            recent_days: default_recent_days(),
            max_partners: default_thread_partners(),
        }
    }
}

fn default_thread_min_days() -> usize {
    3
}
fn default_strip_max_days() -> usize {
    40
}
fn default_active_days() -> i64 {
    2
}
fn default_recent_days() -> i64 {
    7
}
fn default_thread_partners() -> usize {
    4
}

/// Orphan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphansConfig {
    /// Orphans at most this many days old land in the recent bucket
    #[serde(default = "default_orphan_recent_days")]
    pub recent_days: i64,

    /// Section titles kept as context per orphan
    #[serde(default = "default_orphan_context")]
    pub max_context: usize,
}

impl Default for OrphansConfig {
    fn default() -> Self {
        Self {
            recent_days: default_orphan_recent_days(),
            max_context: default_orphan_context(),
        }
    }
}

fn default_orphan_recent_days() -> i64 {
    14
}
fn default_orphan_context() -> usize {
    2
}

/// Connections configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionsConfig {
    /// Maximum pairs listed
    #[serde(default = "default_connections_limit")]
    pub limit: usize,
}

impl Default for ConnectionsConfig {
    fn default() -> Self {
        Self {
            limit: default_connections_limit(),
        }
    }
}

fn default_connections_limit() -> usize {
    20
}

/// Timeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Number of highest-mention threads shown as columns
    #[serde(default = "default_timeline_topics")]
    pub max_topics: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_topics: default_timeline_topics(),
        }
    }
}

fn default_timeline_topics() -> usize {
    12
}

/// Clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Minimum distinct days for a topic to be a cluster candidate
    #[serde(default = "default_cluster_min_days")]
    pub min_days: usize,

    /// Absolute floor on the edge weight threshold (shared sections)
    #[serde(default = "default_min_threshold")]
    pub min_threshold: u32,

    /// Fraction of strongest edges kept above the threshold
    #[serde(default = "default_percentile")]
    pub percentile: f64,

    /// Absolute floor on the hub degree threshold
    #[serde(default = "default_hub_floor")]
    pub hub_floor: usize,

    /// Fraction of candidates a topic must exceed in degree to be a hub
    #[serde(default = "default_hub_fraction")]
    pub hub_fraction: f64,

    /// Members reported as a cluster's core
    #[serde(default = "default_core_size")]
    pub core_size: usize,

    /// Strongest internal edges reported per cluster
    #[serde(default = "default_top_edges")]
    pub top_edges: usize,

    /// Strongest connections reported per hub
    #[serde(default = "default_hub_links")]
    pub hub_links: usize,

    /// Strongest connections reported per peripheral topic
    #[serde(default = "default_peripheral_links")]
    pub peripheral_links: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_days: default_cluster_min_days(),
            min_threshold: default_min_threshold(),
            percentile: default_percentile(),
            hub_floor: default_hub_floor(),
            hub_fraction: default_hub_fraction(),
            core_size: default_core_size(),
            top_edges: default_top_edges(),
            hub_links: default_hub_links(),
            peripheral_links: default_peripheral_links(),
        }
    }
}

fn default_cluster_min_days() -> usize {
    2
}
fn default_min_threshold() -> u32 {
    6
}
fn default_percentile() -> f64 {
    0.15
}
fn default_hub_floor() -> usize {
    3
}
fn default_hub_fraction() -> f64 {
    0.3
}
fn default_core_size() -> usize {
    3
}
fn default_top_edges() -> usize {
    3
}
fn default_hub_links() -> usize {
    5
}
fn default_peripheral_links() -> usize {
    2
}

/// Drift configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Length in days of each of the two compared windows
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

fn default_window_days() -> i64 {
    7
}

/// Deep dive configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepDiveConfig {
    /// Co-occurrence partners listed
    #[serde(default = "default_deep_dive_partners")]
    pub max_partners: usize,

    /// Distinct section titles listed per day
    #[serde(default = "default_titles_per_day")]
    pub max_titles_per_day: usize,

    /// Silence (days) below which a topic is never flagged as going cold
    #[serde(default = "default_cold_after_days")]
    pub cold_after_days: i64,
}

impl Default for DeepDiveConfig {
    fn default() -> Self {
        Self {
            max_partners: default_deep_dive_partners(),
            max_titles_per_day: default_titles_per_day(),
            cold_after_days: default_cold_after_days(),
        }
    }
}

fn default_deep_dive_partners() -> usize {
    10
}
fn default_titles_per_day() -> usize {
    3
}
fn default_cold_after_days() -> i64 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TopicsConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cluster_defaults() {
        let config = ClusterConfig::default();
        assert_eq!(config.min_days, 2);
        assert_eq!(config.min_threshold, 6);
        assert!((config.percentile - 0.15).abs() < f64::EPSILON);
        assert_eq!(config.hub_floor, 3);
        assert!((config.hub_fraction - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.core_size, 3);
    }

    #[test]
    fn test_view_defaults() {
        let config = TopicsConfig::default();
        assert_eq!(config.threads.min_days, 3);
        assert_eq!(config.threads.strip_max_days, 40);
        assert_eq!(config.orphans.recent_days, 14);
        assert_eq!(config.connections.limit, 20);
        assert_eq!(config.timeline.max_topics, 12);
        assert_eq!(config.drift.window_days, 7);
        assert_eq!(config.deep_dive.max_partners, 10);
        assert_eq!(config.deep_dive.max_titles_per_day, 3);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "connections": { "limit": 5 }, "clusters": { "min_threshold": 2 } }"#;
        let config: TopicsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.connections.limit, 5);
        assert_eq!(config.clusters.min_threshold, 2);
        assert_eq!(config.clusters.hub_floor, 3);
        assert_eq!(config.threads.min_days, 3);
    }

    #[test]
    fn test_validation_rejects_bad_percentile() {
        let mut config = TopicsConfig::default();
        config.clusters.percentile = 1.0;
        assert!(config.validate().is_err());

        config.clusters.percentile = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_window() {
        let mut config = TopicsConfig::default();
        config.drift.window_days = 0;
        assert!(matches!(
            config.validate(),
            Err(TopicsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validation_rejects_huge_window() {
        let mut config = TopicsConfig::default();
        config.drift.window_days = 100_000_000;
        assert!(matches!(
            config.validate(),
            Err(TopicsError::InvalidConfig(_))
        ));

        config.drift.window_days = MAX_WINDOW_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = TopicsConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TopicsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.clusters.min_threshold, parsed.clusters.min_threshold);
        assert_eq!(config.threads.min_days, parsed.threads.min_days);
    }
}
