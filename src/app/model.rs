//! Application model: `App`.
//!
//! The `App` struct holds the playback controller, the theme toggle and the
//! small bits of view state the UI and runtime share.

use crate::media::MediaElement;
use crate::player::PlaybackController;
use crate::theme::ThemeToggle;

/// The main application model.
pub struct App<M: MediaElement> {
    pub player: PlaybackController<M>,
    pub theme: ThemeToggle,
    pub metadata_window: bool,
    /// Where the track list came from (playlist file or directory).
    pub source: Option<String>,
}

impl<M: MediaElement> App<M> {
    /// Create a new `App` around `player`.
    pub fn new(player: PlaybackController<M>, theme: ThemeToggle) -> Self {
        Self {
            player,
            theme,
            metadata_window: false,
            source: None,
        }
    }

    /// Record where the track list was loaded from.
    pub fn set_source(&mut self, source: String) {
        self.source = Some(source);
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Label for the play/pause button: what pressing it would do.
    pub fn transport_label(&self) -> &'static str {
        if self.player.is_playing() {
            "Pause"
        } else {
            "Play"
        }
    }

    /// Short status word for the now-playing box.
    pub fn status_text(&self) -> &'static str {
        match (self.player.is_playing(), self.player.is_play_pending()) {
            (true, _) => "Playing",
            (false, true) => "Starting…",
            (false, false) => "Paused",
        }
    }
}
