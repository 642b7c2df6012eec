//! Heading-based document segmentation.
//!
//! A document is cut at every `## ` and `### ` line. `# ` lines are document
//! titles and stay inside whatever section (if any) they appear in. Text before
//! the first heading belongs to no section.

use serde::{Deserialize, Serialize};

/// Contiguous block of a document that starts at a level-2 or level-3 heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, trimmed
    pub title: String,
    /// 2 for `##`, 3 for `###`
    pub level: u8,
    /// Lines up to the next section heading
    pub body_lines: Vec<String>,
}

impl Section {
    /// Text scanned for topics: the title followed by the body, so topics named
    /// only in the heading still count.
    pub fn analyzed_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.body_lines.iter().map(|l| l.len() + 1).sum::<usize>(),
        );
        text.push_str(&self.title);
        for line in &self.body_lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

/// Split a document into its ordered sections.
pub fn segment(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        if let Some((level, title)) = parse_heading(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(Section {
                title: title.to_string(),
                level,
                body_lines: Vec::new(),
            });
        } else if let Some(section) = current.as_mut() {
            section.body_lines.push(line.to_string());
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }
    sections
}

/// Recognize `## title` / `### title`. The marker must be followed by a space
/// and at least one more character.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let (level, rest) = if let Some(rest) = line.strip_prefix("### ") {
        (3, rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        (2, rest)
    } else {
        return None;
    };
    if rest.is_empty() {
        return None;
    }
    Some((level, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_levels() {
        let text = "## First\nalpha\n### Sub\nbeta\n## Second\ngamma";
        let sections = segment(text);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "First");
        assert_eq!(sections[0].level, 2);
        assert_eq!(sections[0].body_lines, vec!["alpha"]);
        assert_eq!(sections[1].title, "Sub");
        assert_eq!(sections[1].level, 3);
        assert_eq!(sections[2].body_lines, vec!["gamma"]);
    }

    #[test]
    fn test_preamble_is_not_a_section() {
        let text = "# Daily log\nintro line\n\n## Work\ndid things";
        let sections = segment(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Work");
        assert_eq!(sections[0].body_lines, vec!["did things"]);
    }

    #[test]
    fn test_level_one_inside_section_is_body() {
        let text = "## Notes\n# not a boundary\nmore";
        let sections = segment(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body_lines, vec!["# not a boundary", "more"]);
    }

    #[test]
    fn test_level_four_and_bare_markers_are_body() {
        let text = "## Top\n#### deep\n##\n##no-space";
        let sections = segment(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body_lines.len(), 3);
    }

    #[test]
    fn test_title_is_trimmed() {
        let sections = segment("##   Spaced out   \r\nbody");
        assert_eq!(sections[0].title, "Spaced out");
    }

    #[test]
    fn test_analyzed_text_includes_title() {
        let sections = segment("## Supabase RLS\nbody one\nbody two");
        assert_eq!(
            sections[0].analyzed_text(),
            "Supabase RLS\nbody one\nbody two"
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(segment("").is_empty());
        assert!(segment("no headings at all\njust text").is_empty());
    }
}
