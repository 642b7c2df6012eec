//! Entity registry: the curated set of topics worth tracking.
//!
//! The registry is plain configuration. It is loaded once (either the
//! built-in curated list or a TOML file) and handed to the graph builder,
//! which compiles the aliases into matchers.
//!
//! ## TOML format
//!
//! ```toml
//! [entities.supabase]
//! type = "tech"
//! aliases = ["supabase"]
//!
//! [entities.rls]
//! type = "concept"
//! aliases = ["rls", "row level security"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// A unique identifier for a topic (the registry key).
pub type TopicId = String;

/// Kind of tracked entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Project,
    Person,
    Tech,
    Concept,
    Tool,
}

impl EntityType {
    /// Lowercase name as used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Project => "project",
            EntityType::Person => "person",
            EntityType::Tech => "tech",
            EntityType::Concept => "concept",
            EntityType::Tool => "tool",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked entity. The id is the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity kind
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Surface forms, matched case-insensitively as whole words/phrases
    pub aliases: Vec<String>,
}

impl Entity {
    /// Create a new entity.
    pub fn new<S: Into<String>>(entity_type: EntityType, aliases: impl IntoIterator<Item = S>) -> Self {
        Self {
            entity_type,
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable map of topic id to entity definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRegistry {
    #[serde(default)]
    entities: BTreeMap<TopicId, Entity>,
}

/// Curated topics shipped with the tool.
const BUILTIN: &[(&str, EntityType, &[&str])] = &[
    // projects
    ("anivia", EntityType::Project, &["anivia"]),
    ("ventok", EntityType::Project, &["ventok", "ventok.eu"]),
    ("collabo", EntityType::Project, &["collabo", "collabo-v2"]),
    ("tuner", EntityType::Project, &["tuner", "mundo"]),
    ("moltbook", EntityType::Project, &["moltbook"]),
    ("clawd", EntityType::Project, &["clawd", "clawdbot"]),
    ("bore", EntityType::Project, &["bore"]),
    // people
    ("ron", EntityType::Person, &["ron"]),
    ("anna", EntityType::Person, &["anna"]),
    // tech
    ("supabase", EntityType::Tech, &["supabase"]),
    ("nextjs", EntityType::Tech, &["next.js", "nextjs", "next js"]),
    ("vercel", EntityType::Tech, &["vercel"]),
    ("react", EntityType::Tech, &["react"]),
    ("stripe", EntityType::Tech, &["stripe"]),
    ("tailwind", EntityType::Tech, &["tailwind", "tailwindcss"]),
    // concepts
    ("rls", EntityType::Concept, &["rls", "row level security"]),
    ("oauth", EntityType::Concept, &["oauth", "oauth2"]),
    (
        "email",
        EntityType::Concept,
        &["email", "emails", "email delivery", "deliverability"],
    ),
    ("sequences", EntityType::Concept, &["sequences", "sequence", "drip"]),
    ("leads", EntityType::Concept, &["leads", "lead", "prospects"]),
    ("campaigns", EntityType::Concept, &["campaigns", "campaign"]),
    ("pipeline", EntityType::Concept, &["pipeline", "sales pipeline"]),
    (
        "outreach",
        EntityType::Concept,
        &["outreach", "cold outreach", "cold email"],
    ),
    ("monochrome", EntityType::Concept, &["monochrome", "monochrome-first"]),
    ("security", EntityType::Concept, &["security", "security scanner"]),
    ("nightly", EntityType::Concept, &["nightly build", "nightly builds"]),
    ("heartbeat", EntityType::Concept, &["heartbeat", "heartbeats"]),
    ("design", EntityType::Concept, &["design", "ui design", "ux"]),
    ("landing", EntityType::Concept, &["landing page", "landing"]),
    ("pricing", EntityType::Concept, &["pricing"]),
    ("dns", EntityType::Concept, &["dns", "domain"]),
    (
        "deployment",
        EntityType::Concept,
        &["deploy", "deployment", "deployed"],
    ),
    ("testing", EntityType::Concept, &["test", "tests", "testing"]),
    ("migration", EntityType::Concept, &["migration", "migrations"]),
    ("webhook", EntityType::Concept, &["webhook", "webhooks"]),
    ("api", EntityType::Concept, &["api", "api route", "endpoint"]),
    ("dashboard", EntityType::Concept, &["dashboard"]),
    // tools
    ("arc", EntityType::Tool, &["arc cli", "arc tool"]),
];

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The curated registry shipped with the tool.
    pub fn builtin() -> Self {
        let entities = BUILTIN
            .iter()
            .map(|(id, entity_type, aliases)| {
                (
                    (*id).to_string(),
                    Entity::new(*entity_type, aliases.iter().copied()),
                )
            })
            .collect();
        Self { entities }
    }

    /// Parse and validate a registry from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, MapError> {
        let registry: Self = toml::from_str(text)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Read, parse and validate a registry file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Add an entity, replacing any previous definition with the same id.
    pub fn with_entity(mut self, id: impl Into<TopicId>, entity: Entity) -> Self {
        self.entities.insert(id.into(), entity);
        self
    }

    /// Check every entity has at least one non-blank alias.
    pub fn validate(&self) -> Result<(), MapError> {
        for (id, entity) in &self.entities {
            if id.trim().is_empty() {
                return Err(MapError::InvalidRegistry(
                    "entity id must not be blank".to_string(),
                ));
            }
            if entity.aliases.is_empty() {
                return Err(MapError::InvalidRegistry(format!(
                    "entity '{}' has no aliases",
                    id
                )));
            }
            if entity.aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(MapError::InvalidRegistry(format!(
                    "entity '{}' has a blank alias",
                    id
                )));
            }
        }
        Ok(())
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Check if an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Iterate entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, &Entity)> {
        self.entities.iter()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the registry has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
