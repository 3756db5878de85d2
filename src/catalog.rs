//! Catalog loading
//!
//! A catalog file is JSON holding either a bare array of item records or an
//! object with a `projects` array:
//!
//! ```json
//! [{ "title": "Clock", "category": "Tools", "folder": "clock" }]
//! ```
//!
//! ```json
//! { "projects": [{ "title": "Clock" }] }
//! ```

use crate::item::Item;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Catalog is not valid JSON or not a list of items
    #[error("Invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Item>),
    Wrapped { projects: Vec<Item> },
}

/// Parse a catalog from a JSON string
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the JSON is malformed or does not contain
/// a list of items with titles.
pub fn from_json_str(raw: &str) -> Result<Vec<Item>, CatalogError> {
    let file: CatalogFile = serde_json::from_str(raw)?;
    Ok(match file {
        CatalogFile::List(items) | CatalogFile::Wrapped { projects: items } => items,
    })
}

/// Load a catalog from a JSON file
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read and
/// `CatalogError::Parse` if its contents are not a valid catalog.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Item>, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = from_json_str(&raw)?;
    tracing::info!(path = %path.display(), items = items.len(), "catalog loaded");
    Ok(items)
}
