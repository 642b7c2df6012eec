//! Command implementations for kmap.
//!
//! Every command follows the same path: load settings, load the corpus,
//! build the topic graph once, render one view as pretty JSON on stdout.
//! Logs go to stderr.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use kmap_topics::{GraphBuilder, TopicsConfig, ViewEngine};
use kmap_types::{EntityRegistry, Settings};

use crate::cli::{Cli, Commands};
use crate::loader::load_corpus;

/// Run one CLI invocation.
///
/// 1. Load configuration (defaults -> file -> env -> CLI)
/// 2. Initialize logging
/// 3. Render the requested view to stdout
pub fn run(cli: Cli) -> Result<()> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let topics: TopicsConfig = Settings::load_section(cli.config.as_deref(), "topics")
        .context("Failed to load topics configuration")?;

    // CLI overrides have the highest precedence
    if let Some(root) = cli.root {
        settings.root = root;
    }
    if let Some(registry) = cli.registry {
        settings.registry_path = Some(registry);
    }
    if let Some(log_level) = cli.log_level {
        settings.log_level = log_level;
    }

    init_tracing(&settings.log_level)?;

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let output = report(&settings, &topics, &cli.command, today)?;
    println!("{}", output);
    Ok(())
}

/// Build the graph described by `settings` and render one view of it.
pub fn report(
    settings: &Settings,
    topics: &TopicsConfig,
    command: &Commands,
    today: NaiveDate,
) -> Result<String> {
    topics.validate().context("Invalid topics configuration")?;

    let registry = load_registry(settings)?;
    let builder = GraphBuilder::new(&registry).context("Failed to compile entity registry")?;

    let root = settings.expanded_root();
    info!(root = %root.display(), entities = registry.len(), %today, "Mapping corpus");

    let docs = load_corpus(settings);
    let graph = builder.build(&docs);

    let engine = ViewEngine::new(&graph, builder.extractor(), topics, today);
    render(&engine, command)
}

/// Render one view as pretty JSON.
pub fn render(engine: &ViewEngine<'_>, command: &Commands) -> Result<String> {
    debug!(?command, "Rendering view");
    match command {
        Commands::Overview => to_json(&engine.overview()),
        Commands::Topic { query } => to_json(&engine.deep_dive(query)),
        Commands::Threads => to_json(&engine.threads()),
        Commands::Orphans => to_json(&engine.orphans()),
        Commands::Connections { limit } => to_json(&engine.connections(*limit)),
        Commands::Timeline { topics } => to_json(&engine.timeline(*topics)),
        Commands::Clusters => to_json(&engine.clusters()),
        Commands::Drift => to_json(&engine.drift()),
        Commands::Summary => to_json(&engine.summary()),
        Commands::Graph => to_json(&engine.export()),
    }
}

fn load_registry(settings: &Settings) -> Result<EntityRegistry> {
    match settings.registry_file() {
        Some(path) => EntityRegistry::from_toml_file(&path)
            .with_context(|| format!("Failed to load entity registry from {}", path.display())),
        None => Ok(EntityRegistry::builtin()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize view")
}

fn init_tracing(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}
