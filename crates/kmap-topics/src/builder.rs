//! Graph construction from a document corpus.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kmap_topics::GraphBuilder;
//! use kmap_types::{Document, EntityRegistry};
//!
//! let builder = GraphBuilder::new(&EntityRegistry::builtin()).unwrap();
//! let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
//! let docs = vec![Document::dated(
//!     "memory/2026-01-05.md",
//!     day,
//!     "## Auth\nsupabase rls policies",
//! )];
//!
//! let graph = builder.build(&docs);
//! assert_eq!(graph.weight("supabase", "rls"), 1);
//! ```

use kmap_types::{Document, EntityRegistry};
use tracing::{debug, info, instrument};

use crate::error::TopicsError;
use crate::extraction::TopicExtractor;
use crate::sections::segment;
use crate::types::{SectionOccurrence, TopicGraph};

/// Folds documents into a [`TopicGraph`].
///
/// Per document:
/// 1. Topics found anywhere in the raw text get the document's day (if any)
///    and their full alias match count added to `mentions`.
/// 2. Each `##`/`###` section is scanned on its own; topics found there get a
///    section occurrence, and every pair of them shares one more section.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    extractor: TopicExtractor,
}

impl GraphBuilder {
    /// Compile the registry and create a builder.
    pub fn new(registry: &EntityRegistry) -> Result<Self, TopicsError> {
        Ok(Self::from_extractor(TopicExtractor::new(registry)?))
    }

    /// Create a builder around an already compiled extractor.
    pub fn from_extractor(extractor: TopicExtractor) -> Self {
        Self { extractor }
    }

    /// The extractor used for every document.
    pub fn extractor(&self) -> &TopicExtractor {
        &self.extractor
    }

    /// Build the graph of a whole corpus, documents taken in order.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn build(&self, documents: &[Document]) -> TopicGraph {
        let mut graph = TopicGraph::new();
        for doc in documents {
            self.add_document(&mut graph, doc);
        }
        info!(
            topics = graph.len(),
            documents = graph.document_count(),
            days = graph.document_dates().len(),
            "Built topic graph"
        );
        graph
    }

    /// Build the partial graph of a single document.
    ///
    /// Merging the partials of every document in order yields the same graph
    /// as [`GraphBuilder::build`].
    pub fn build_document(&self, doc: &Document) -> TopicGraph {
        let mut graph = TopicGraph::new();
        self.add_document(&mut graph, doc);
        graph
    }

    fn add_document(&self, graph: &mut TopicGraph, doc: &Document) {
        graph.record_document(doc.date);

        let doc_topics = self.extractor.extract_indices(&doc.text);
        for &idx in &doc_topics {
            let entity = self.extractor.entity(idx);
            let count = self.extractor.count_matches_at(idx, &doc.text);
            let state = graph.state_mut(&entity.id, entity.entity_type);
            if let Some(date) = doc.date {
                state.dates.insert(date);
            }
            state.mentions += count;
        }

        let sections = segment(&doc.text);
        for section in &sections {
            let section_topics = self.extractor.extract_indices(&section.analyzed_text());

            for &idx in &section_topics {
                let entity = self.extractor.entity(idx);
                graph
                    .state_mut(&entity.id, entity.entity_type)
                    .sections
                    .push(SectionOccurrence {
                        date: doc.date,
                        title: section.title.clone(),
                        level: section.level,
                    });
            }

            for (i, &a) in section_topics.iter().enumerate() {
                for &b in &section_topics[i + 1..] {
                    let a_id = &self.extractor.entity(a).id;
                    let b_id = &self.extractor.entity(b).id;
                    graph.add_cooccurrence(a_id, b_id);
                }
            }
        }

        debug!(
            source = %doc.source,
            dated = doc.date.is_some(),
            topics = doc_topics.len(),
            sections = sections.len(),
            "Processed document"
        );
    }
}
