//! Registry-driven topic extraction.
//!
//! Every alias of every entity is compiled once into a case-insensitive,
//! word-bounded regex. Multi-word aliases match as a single phrase, and
//! regex metacharacters in aliases (`next.js`) are escaped first.
//!
//! Entities live in an arena ordered by topic id; internal callers work with
//! arena indices so iteration order never depends on hashing.

use std::collections::BTreeSet;

use kmap_types::{EntityRegistry, EntityType, TopicId};
use regex::Regex;
use tracing::debug;

use crate::error::TopicsError;

/// One registry entity with its precompiled alias matchers.
#[derive(Debug, Clone)]
pub(crate) struct CompiledEntity {
    pub(crate) id: TopicId,
    pub(crate) entity_type: EntityType,
    aliases: Vec<String>,
    patterns: Vec<Regex>,
}

impl CompiledEntity {
    /// True if any alias occurs in the text. Stops at the first match.
    fn is_present(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }

    /// Total number of non-overlapping matches of every alias.
    fn count_matches(&self, text: &str) -> u64 {
        self.patterns
            .iter()
            .map(|re| re.find_iter(text).count() as u64)
            .sum()
    }
}

/// Finds registry topics in free text.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    entities: Vec<CompiledEntity>,
}

impl TopicExtractor {
    /// Validate the registry and compile every alias.
    pub fn new(registry: &EntityRegistry) -> Result<Self, TopicsError> {
        registry.validate()?;

        let mut entities = Vec::with_capacity(registry.len());
        for (id, entity) in registry.iter() {
            let patterns = entity
                .aliases
                .iter()
                .map(|alias| {
                    alias_pattern(alias).map_err(|source| TopicsError::Pattern {
                        topic: id.clone(),
                        alias: alias.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            entities.push(CompiledEntity {
                id: id.clone(),
                entity_type: entity.entity_type,
                aliases: entity.aliases.clone(),
                patterns,
            });
        }

        debug!(entities = entities.len(), "Compiled entity registry");
        Ok(Self { entities })
    }

    /// Topics present in the text.
    pub fn extract(&self, text: &str) -> BTreeSet<TopicId> {
        self.extract_indices(text)
            .into_iter()
            .map(|idx| self.entities[idx].id.clone())
            .collect()
    }

    /// Count every alias match of one topic in the text.
    ///
    /// Returns 0 for unknown topics.
    pub fn count_matches(&self, topic: &str, text: &str) -> u64 {
        self.find(topic).map_or(0, |e| e.count_matches(text))
    }

    /// Resolve a user query to a topic id by exact id or exact alias,
    /// ignoring case. An id match always beats an alias match.
    pub fn resolve(&self, query: &str) -> Option<&TopicId> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.entities
            .iter()
            .find(|e| e.id.to_lowercase() == query)
            .or_else(|| {
                self.entities
                    .iter()
                    .find(|e| e.aliases.iter().any(|a| a.to_lowercase() == query))
            })
            .map(|e| &e.id)
    }

    /// Entity type of a registered topic.
    pub fn entity_type(&self, topic: &str) -> Option<EntityType> {
        self.find(topic).map(|e| e.entity_type)
    }

    /// Number of compiled entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the extractor knows no topics.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Arena indices (ascending, i.e. in topic id order) of topics present in the text.
    pub(crate) fn extract_indices(&self, text: &str) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_present(text))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub(crate) fn entity(&self, idx: usize) -> &CompiledEntity {
        &self.entities[idx]
    }

    pub(crate) fn count_matches_at(&self, idx: usize, text: &str) -> u64 {
        self.entities[idx].count_matches(text)
    }

    fn find(&self, topic: &str) -> Option<&CompiledEntity> {
        self.entities
            .binary_search_by(|e| e.id.as_str().cmp(topic))
            .ok()
            .map(|idx| &self.entities[idx])
    }
}

fn alias_pattern(alias: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(alias.trim())))
}
