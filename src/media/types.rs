//! Media-related small types.
//!
//! Commands flowing into the audio thread, events flowing out of it and
//! the `MediaElement` trait the playback controller is written against.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Identifies one `play()` request so its outcome can be matched later.
pub type PlayRequest = u64;

/// Identifies one `load()`. Position, metadata and end-of-track events carry
/// it, so events about a source that was already replaced can be told apart.
pub type LoadGeneration = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// `play()` was requested before any source was loaded.
    #[error("no source loaded")]
    NoSource,

    #[error("failed to open {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("audio output unavailable: {0}")]
    Output(String),
}

/// Lifecycle notifications emitted by a media element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback position changed.
    TimeUpdate {
        generation: LoadGeneration,
        position: Duration,
    },
    /// Metadata of the loaded source is known. `duration` is `None` when the
    /// length could not be read.
    MetadataLoaded {
        generation: LoadGeneration,
        duration: Option<Duration>,
    },
    /// The loaded source played to the end. `request` is the play request
    /// that started the audio which just ran out.
    Ended {
        generation: LoadGeneration,
        request: PlayRequest,
    },
    /// The given play request actually started audio.
    PlayStarted(PlayRequest),
    /// The given play request was declined.
    PlayRejected {
        request: PlayRequest,
        error: MediaError,
    },
}

/// The play/pause/seek surface of a single audio element.
///
/// Calls never block on the outcome: `play` hands back a request id and the
/// result arrives later as `PlayStarted` or `PlayRejected`.
pub trait MediaElement {
    /// Replace the current source. Playback stops and the position resets.
    ///
    /// Returns the generation that events about this source will carry.
    fn load(&mut self, source: &Path) -> LoadGeneration;
    /// Ask for playback to start or resume.
    fn play(&mut self) -> PlayRequest;
    /// Pause playback, keeping the position.
    fn pause(&mut self);
    /// Move the playback position.
    fn seek(&mut self, position: Duration);
}

#[derive(Debug)]
pub(super) enum MediaCmd {
    Load {
        path: PathBuf,
        generation: LoadGeneration,
    },
    Play(PlayRequest),
    Pause,
    Seek(Duration),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
