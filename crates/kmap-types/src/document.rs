//! Corpus documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One text document of the corpus.
///
/// Daily logs carry the day they were written. Long-lived notes files are
/// undated: they still contribute mentions and co-occurrence but never take
/// part in any date-based analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Where the document came from (e.g. `memory/2026-01-05.md`)
    pub source: String,
    /// Calendar day of the document, if it has one
    pub date: Option<NaiveDate>,
    /// Raw UTF-8 text, may contain `##`/`###` heading lines
    pub text: String,
}

impl Document {
    /// Create a document dated to a single day.
    pub fn dated(source: impl Into<String>, date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            date: Some(date),
            text: text.into(),
        }
    }

    /// Create a document without a date.
    pub fn undated(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            date: None,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dated_document() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let doc = Document::dated("memory/2026-01-05.md", date, "## Log\nhello");
        assert_eq!(doc.date, Some(date));
        assert_eq!(doc.source, "memory/2026-01-05.md");
    }

    #[test]
    fn test_undated_document() {
        let doc = Document::undated("MEMORY.md", "notes");
        assert_eq!(doc.date, None);
    }

    #[test]
    fn test_document_serialization() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let doc = Document::dated("a.md", date, "text");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"2026-02-01\""));
        let decoded: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, doc);
    }
}
