use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::LibrarySettings;

use super::model::{PlaylistError, Track};
use super::scan::scan;

#[derive(Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Load a TOML playlist made of `[[tracks]]` entries.
///
/// Relative `audio`/`image` paths are resolved against the directory that
/// holds the playlist file, so a playlist can travel with its songs.
pub fn load_playlist(path: &Path) -> Result<Vec<Track>, PlaylistError> {
    let text = fs::read_to_string(path).map_err(|source| PlaylistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: PlaylistFile = toml::from_str(&text).map_err(|source| PlaylistError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let tracks: Vec<Track> = file
        .tracks
        .into_iter()
        .map(|t| Track {
            title: t.title,
            audio: base.join(t.audio),
            image: t.image.map(|i| base.join(i)),
        })
        .collect();

    if tracks.is_empty() {
        return Err(PlaylistError::Empty);
    }
    Ok(tracks)
}

/// Build the track list from `source`: a playlist file or a music directory.
pub fn resolve_tracks(
    source: &Path,
    settings: &LibrarySettings,
) -> Result<Vec<Track>, PlaylistError> {
    let tracks = if source.is_dir() {
        scan(source, settings)
    } else {
        load_playlist(source)?
    };

    if tracks.is_empty() {
        return Err(PlaylistError::Empty);
    }
    tracing::info!(source = %source.display(), count = tracks.len(), "loaded track list");
    Ok(tracks)
}
