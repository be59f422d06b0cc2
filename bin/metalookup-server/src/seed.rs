//! Startup import of metadata documents from a JSON file.
//!
//! The file holds a JSON array of `{"group", "name", "value"}` documents
//! (an optional `"id"` upserts that entity). Documents are saved in file
//! order, which becomes their group listing order.

use anyhow::{Context, Result};
use metalookup_common::Metadata;
use metalookup_store::{MetadataStore, StoreError};
use std::path::Path;
use tracing::{debug, warn};

/// Save every document in `path`. Documents with an empty group or name are
/// skipped with a warning; any other store failure aborts the import.
pub fn import(store: &dyn MetadataStore, path: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let documents: Vec<Metadata> = serde_json::from_str(&text)
        .with_context(|| format!("Seed file {} is not a JSON array of metadata", path.display()))?;

    let mut imported = 0;
    for (index, document) in documents.into_iter().enumerate() {
        match store.save(document) {
            Ok(saved) => {
                debug!(
                    "Seeded {}:{} as {}",
                    saved.group,
                    saved.name,
                    saved.id.map(|id| id.to_string()).unwrap_or_default()
                );
                imported += 1;
            }
            Err(StoreError::Invalid(e)) if e.is_invalid_metadata() => {
                warn!("Skipping seed document #{}: {}", index, e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to save seed document #{index}"));
            }
        }
    }
    Ok(imported)
}
