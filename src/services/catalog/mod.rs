// Catalog service
// Loads lecture catalogs from JSON and merges them into one list

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::models::lecture::Lecture;

/// Parse one JSON array of lecture records
pub fn parse_catalog(json: &str) -> Result<Vec<Lecture>> {
    let lectures: Vec<Lecture> =
        serde_json::from_str(json).context("Failed to parse lecture catalog")?;
    Ok(lectures)
}

/// Read a JSON catalog file
pub fn load_catalog_file(path: &Path) -> Result<Vec<Lecture>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("Invalid catalog {}", path.display()))
}

/// Concatenate catalogs in order.
///
/// The first record with a given id wins; later duplicates and records that
/// fail validation are skipped with a warning.
pub fn merge_catalogs<I>(sources: I) -> Vec<Arc<Lecture>>
where
    I: IntoIterator<Item = Vec<Lecture>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for lecture in sources.into_iter().flatten() {
        if let Err(e) = lecture.validate() {
            log::warn!("Skipping catalog record: {}", e);
            continue;
        }
        if !seen.insert(lecture.id.clone()) {
            log::warn!("Skipping duplicate lecture id {}", lecture.id);
            continue;
        }
        merged.push(Arc::new(lecture));
    }

    merged
}

/// Load and merge several catalog files
pub fn load_catalogs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Arc<Lecture>>> {
    let sources = paths
        .iter()
        .map(|path| load_catalog_file(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let catalog = merge_catalogs(sources);
    log::info!(
        "Loaded {} lectures from {} catalog file(s)",
        catalog.len(),
        paths.len()
    );
    Ok(catalog)
}
