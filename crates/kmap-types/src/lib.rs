//! # kmap-types
//!
//! Shared domain types for the knowledge map.
//!
//! This crate defines the inputs every other crate works from:
//! - Entities: curated topics with a type and a list of surface aliases
//! - Documents: dated (or undated) heading-structured text
//! - Settings: layered configuration for the `kmap` binary
//!
//! ## Usage
//!
//! ```rust
//! use kmap_types::{Document, EntityRegistry};
//!
//! let registry = EntityRegistry::builtin();
//! assert!(registry.contains("supabase"));
//!
//! let doc = Document::undated("MEMORY.md", "## Stack\nsupabase + vercel");
//! assert!(doc.date.is_none());
//! ```

pub mod config;
pub mod document;
pub mod entity;
pub mod error;

pub use config::Settings;
pub use document::Document;
pub use entity::{Entity, EntityRegistry, EntityType, TopicId};
pub use error::MapError;
