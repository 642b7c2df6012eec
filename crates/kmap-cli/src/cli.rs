//! CLI argument parsing for kmap.
//!
//! CLI flags override all other config sources.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Knowledge map
///
/// Maps recurring topics, threads and clusters across a directory of daily notes.
#[derive(Parser, Debug)]
#[command(name = "kmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/kmap/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Workspace root holding the memory directory and notes file
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Entity registry TOML file (defaults to the built-in registry)
    #[arg(long, global = true)]
    pub registry: Option<String>,

    /// Reference day for recency views (defaults to the local date)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Views
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// All topics by mentions, grouped by type
    Overview,

    /// Deep dive into one topic
    Topic {
        /// Topic id or alias
        query: String,
    },

    /// Topics that recur across days
    Threads,

    /// Topics mentioned on a single day
    Orphans,

    /// Strongest co-occurring pairs
    Connections {
        /// Maximum pairs (default from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Weekly presence of the busiest threads
    Timeline {
        /// Number of threads shown (default from config)
        #[arg(short, long)]
        topics: Option<usize>,
    },

    /// Groups of strongly co-occurring topics
    Clusters,

    /// Rising and fading topics, last week against the week before
    Drift,

    /// Corpus totals
    Summary,

    /// Dump the raw topic graph
    Graph,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overview() {
        let cli = Cli::parse_from(["kmap", "overview"]);
        assert_eq!(cli.command, Commands::Overview);
    }

    #[test]
    fn test_cli_topic_query() {
        let cli = Cli::parse_from(["kmap", "topic", "Next.js"]);
        match cli.command {
            Commands::Topic { query } => assert_eq!(query, "Next.js"),
            _ => panic!("Expected Topic command"),
        }
    }

    #[test]
    fn test_cli_connections_limit() {
        let cli = Cli::parse_from(["kmap", "connections", "--limit", "5"]);
        assert_eq!(cli.command, Commands::Connections { limit: Some(5) });

        let cli = Cli::parse_from(["kmap", "connections"]);
        assert_eq!(cli.command, Commands::Connections { limit: None });
    }

    #[test]
    fn test_cli_timeline_topics() {
        let cli = Cli::parse_from(["kmap", "timeline", "-t", "4"]);
        assert_eq!(cli.command, Commands::Timeline { topics: Some(4) });
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["kmap", "--config", "/path/to/config.toml", "drift"]);
        assert_eq!(cli.config, Some("/path/to/config.toml".to_string()));
    }

    #[test]
    fn test_cli_global_flags_after_command() {
        let cli = Cli::parse_from([
            "kmap",
            "threads",
            "--root",
            "/notes",
            "--registry",
            "entities.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.command, Commands::Threads);
        assert_eq!(cli.root, Some("/notes".to_string()));
        assert_eq!(cli.registry, Some("entities.toml".to_string()));
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_today() {
        let cli = Cli::parse_from(["kmap", "--today", "2026-02-14", "orphans"]);
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2026, 2, 14));
    }

    #[test]
    fn test_cli_rejects_bad_today() {
        let result = Cli::try_parse_from(["kmap", "--today", "14/02/2026", "orphans"]);
        assert!(result.is_err());
    }
}
