//! Fetching raw source bytes from a URI.
//!
//! Remote sources are downloaded fully into memory before decoding; local
//! sources are read from disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Upper bound on a downloaded source.
const MAX_SOURCE_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch {uri}: {source}")]
    Http { uri: String, source: ureq::Error },

    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("no audio output device")]
    NoDevice,
}

/// Where a source URI points.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Location<'a> {
    Remote(&'a str),
    Local(&'a Path),
}

pub(crate) fn locate(uri: &str) -> Location<'_> {
    let trimmed = uri.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Location::Remote(trimmed)
    } else if let Some(path) = trimmed.strip_prefix("file://") {
        Location::Local(Path::new(path))
    } else {
        Location::Local(Path::new(trimmed))
    }
}

/// Read the full contents of `uri`, blocking the calling thread.
pub(super) fn fetch(uri: &str, timeout: Duration) -> Result<Vec<u8>, SourceError> {
    match locate(uri) {
        Location::Remote(url) => {
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build()
                .into();

            let http_err = |source| SourceError::Http {
                uri: url.to_string(),
                source,
            };

            let mut response = agent.get(url).call().map_err(http_err)?;
            response
                .body_mut()
                .with_config()
                .limit(MAX_SOURCE_BYTES)
                .read_to_vec()
                .map_err(http_err)
        }
        Location::Local(path) => std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
