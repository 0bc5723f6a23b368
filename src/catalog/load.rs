use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;

use super::model::{Catalog, Track};

/// On-disk layout: a list of `[[tracks]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

impl Catalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.tracks)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml(&text)?;
        tracing::info!(path = %path.display(), tracks = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}
