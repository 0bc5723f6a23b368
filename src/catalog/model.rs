use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::error::CatalogError;

fn default_accent() -> String {
    "#ffffff".to_string()
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Cover image URI.
    #[serde(default)]
    pub cover: String,
    /// Audio source: `http(s)://`, `file://` or a plain filesystem path.
    pub source: String,
    /// Accent color as `#rrggbb`.
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Nominal duration in seconds. Display only; the decoder is authoritative.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub lyrics: Vec<String>,
}

impl Track {
    pub fn nominal_duration(&self) -> Duration {
        Duration::from_secs(self.duration)
    }
}

/// Ordered, non-empty track list with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(super) tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and duplicate ids.
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for t in &tracks {
            if !seen.insert(t.id) {
                return Err(CatalogError::DuplicateId(t.id));
            }
        }

        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Map any signed index onto a valid position, wrapping in both directions.
    pub fn wrap_index(&self, index: isize) -> usize {
        index.rem_euclid(self.tracks.len() as isize) as usize
    }

    /// Track at `index` after wrap-around. Never fails because the catalog is non-empty.
    pub fn track(&self, index: usize) -> &Track {
        &self.tracks[index % self.tracks.len()]
    }
}
