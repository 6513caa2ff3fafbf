use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// One playable item. Identity is its position in the track list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub title: String,
    /// Audio file to decode.
    pub audio: PathBuf,
    /// Cover art, when one is known.
    #[serde(default)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to read playlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse playlist {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no playable tracks found")]
    Empty,
}
