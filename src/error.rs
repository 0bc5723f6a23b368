//! Error types shared across the player.

use std::path::PathBuf;

use thiserror::Error;

/// The only way playback can fail: the output refused to start or resume.
///
/// Autoplay policy, missing device, fetch failures and decode errors all
/// collapse into this one category; the reason string is kept for the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("playback rejected: {reason}")]
    Rejected { reason: String },
}

impl PlaybackError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Errors raised while building a catalog from a TOML file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog has no tracks")]
    Empty,

    #[error("duplicate track id {0} in catalog")]
    DuplicateId(u32),
}
