//! Loads the static category list from a JSON file at start-up.
//!
//! The file holds an array of `{"category": "<name>"}` objects. The list is
//! read once; the resulting catalogue is immutable for the process lifetime.

use std::path::Path;

use tracing::info;

use crate::domain::{CategoryCatalogue, CategoryDefinition};

/// Errors raised while loading the category list.
#[derive(Debug, thiserror::Error)]
pub enum CategoryLoadError {
    #[error("failed to read category list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("category list {path} is not a JSON array of {{\"category\": ...}} objects: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a category list from JSON bytes.
pub fn parse_categories(bytes: &[u8]) -> Result<CategoryCatalogue, serde_json::Error> {
    let definitions: Vec<CategoryDefinition> = serde_json::from_slice(bytes)?;
    Ok(CategoryCatalogue::from_definitions(definitions))
}

/// Read and parse the category list at `path`.
pub fn load_categories(path: &Path) -> Result<CategoryCatalogue, CategoryLoadError> {
    let shown = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| CategoryLoadError::Read {
        path: shown.clone(),
        source,
    })?;
    let catalogue = parse_categories(&bytes).map_err(|source| CategoryLoadError::Parse {
        path: shown.clone(),
        source,
    })?;
    info!(path = %shown, categories = catalogue.names().len(), "loaded category list");
    Ok(catalogue)
}
