use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

const COVER_STEMS: [&str; 2] = ["cover", "folder"];
const COVER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Title from the file's tag, falling back to the file stem.
fn read_title(path: &Path) -> String {
    let tagged_title = lofty::read_from_path(path).ok().and_then(|tagged| {
        tagged
            .primary_tag()
            .or_else(|| tagged.first_tag())
            .and_then(|tag| tag.title().map(|t| t.trim().to_string()))
            .filter(|t| !t.is_empty())
    });

    tagged_title.unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    })
}

/// Look for `cover.*` / `folder.*` next to the audio file.
fn find_cover(audio: &Path) -> Option<PathBuf> {
    let dir = audio.parent()?;
    COVER_STEMS
        .iter()
        .flat_map(|stem| {
            COVER_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{stem}.{ext}")))
        })
        .find(|candidate| candidate.is_file())
}

pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            tracks.push(Track {
                title: read_title(path),
                audio: path.to_path_buf(),
                image: find_cover(path),
            });
        }
    }

    tracks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    tracing::debug!(dir = %dir.display(), found = tracks.len(), "scanned music directory");
    tracks
}
