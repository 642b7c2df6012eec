//! Corpus loading from the workspace root.
//!
//! Daily logs are the `YYYY-MM-DD.md` files directly inside the memory
//! directory, dated by file name. The notes file, if present, is loaded last
//! as an undated document.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};
use walkdir::WalkDir;

use kmap_types::{Document, Settings};

/// Load every document the settings point at.
pub fn load_corpus(settings: &Settings) -> Vec<Document> {
    let mut docs = load_daily_logs(&settings.memory_path());
    if let Some(notes) = settings.notes_path() {
        if let Some(doc) = load_notes(&notes) {
            docs.push(doc);
        }
    }
    docs
}

/// Load dated logs in date order. A missing directory yields no documents.
pub fn load_daily_logs(dir: &Path) -> Vec<Document> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "Memory directory not found");
        return Vec::new();
    }

    let mut logs: Vec<(NaiveDate, std::path::PathBuf)> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let date = log_date(e.file_name().to_str()?)?;
            Some((date, e.into_path()))
        })
        .collect();
    logs.sort();

    logs.into_iter()
        .filter_map(|(date, path)| match fs::read_to_string(&path) {
            Ok(text) => Some(Document::dated(path.display().to_string(), date, text)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable log");
                None
            }
        })
        .collect()
}

fn load_notes(path: &Path) -> Option<Document> {
    if !path.is_file() {
        debug!(path = %path.display(), "Notes file not found");
        return None;
    }
    match fs::read_to_string(path) {
        Ok(text) => Some(Document::undated(path.display().to_string(), text)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping unreadable notes file");
            None
        }
    }
}

/// Parse `YYYY-MM-DD.md` into its date.
fn log_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(".md")?;
    if stem.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}
