use std::time::Duration;

use crate::media::{LoadGeneration, MediaElement, MediaEvent, PlayRequest};
use crate::playlist::{PlaylistError, Track};

/// Transport state for a fixed track list, driving a single media element.
///
/// `is_playing` only turns on once the element confirms a play request; a
/// request that is still in flight is remembered in `pending_play`, and any
/// later request supersedes it.
///
/// Position, metadata and end events tagged with an older load generation
/// are dropped, and `Ended` only counts for the request that is audibly
/// playing.
pub struct PlaybackController<M: MediaElement> {
    tracks: Vec<Track>,
    media: M,
    current: usize,
    is_playing: bool,
    current_time: Duration,
    duration: Option<Duration>,
    pending_play: Option<PlayRequest>,
    started_play: Option<PlayRequest>,
    generation: LoadGeneration,
}

impl<M: MediaElement> PlaybackController<M> {
    /// Take ownership of `media` and load the first of `tracks` into it, paused.
    pub fn new(tracks: Vec<Track>, mut media: M) -> Result<Self, PlaylistError> {
        let first = tracks.first().ok_or(PlaylistError::Empty)?;
        let generation = media.load(&first.audio);

        Ok(Self {
            tracks,
            media,
            current: 0,
            is_playing: false,
            current_time: Duration::ZERO,
            duration: None,
            pending_play: None,
            started_play: None,
            generation,
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// True while a play request waits for the element's answer.
    pub fn is_play_pending(&self) -> bool {
        self.pending_play.is_some()
    }

    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    /// Track length, once the element has reported metadata.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Played share of the current track in `[0, 1]`; `0` while the length is unknown.
    pub fn progress_ratio(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                (self.current_time.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Pause when playing, otherwise ask the element to start.
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.media.pause();
            self.is_playing = false;
            self.pending_play = None;
            self.started_play = None;
            tracing::debug!(index = self.current, "paused");
        } else {
            self.request_play();
        }
    }

    pub fn play_next(&mut self) {
        let next = (self.current + 1) % self.tracks.len();
        self.change_track(next);
    }

    pub fn play_prev(&mut self) {
        let len = self.tracks.len();
        let prev = (self.current + len - 1) % len;
        self.change_track(prev);
    }

    /// Seek to `fraction` (clamped to `[0, 1]`) of the current track.
    ///
    /// Returns the requested position, or `None` while the length is unknown.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Option<Duration> {
        let duration = self.duration?;
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = duration.mul_f64(fraction);
        self.seek(target);
        Some(target)
    }

    /// Seek `seconds` forward (or backward when negative), staying within the track.
    pub fn seek_by(&mut self, seconds: i64) -> Duration {
        let delta = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds < 0 {
            self.current_time.saturating_sub(delta)
        } else {
            self.clamp_to_duration(self.current_time.saturating_add(delta))
        };
        self.seek(target);
        target
    }

    /// Fold a notification from the media element into the transport state.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate {
                generation,
                position,
            } => {
                if generation == self.generation {
                    self.current_time = self.clamp_to_duration(position);
                }
            }
            MediaEvent::MetadataLoaded {
                generation,
                duration,
            } => {
                if generation == self.generation {
                    self.duration = duration;
                    self.current_time = self.clamp_to_duration(self.current_time);
                }
            }
            MediaEvent::Ended {
                generation,
                request,
            } => {
                if generation != self.generation || self.started_play != Some(request) {
                    tracing::debug!(generation, request, "ignoring stale end of track");
                    return;
                }
                tracing::debug!(index = self.current, "track ended");
                self.play_next();
            }
            MediaEvent::PlayStarted(request) => {
                if self.pending_play == Some(request) {
                    self.pending_play = None;
                    self.started_play = Some(request);
                    self.is_playing = true;
                    tracing::debug!(index = self.current, request, "playing");
                }
            }
            MediaEvent::PlayRejected { request, error } => {
                tracing::warn!(
                    track = %self.current_track().title,
                    request,
                    %error,
                    "playback did not start"
                );
                if self.pending_play == Some(request) {
                    self.pending_play = None;
                    self.is_playing = false;
                }
            }
        }
    }

    fn request_play(&mut self) {
        self.pending_play = Some(self.media.play());
    }

    fn seek(&mut self, target: Duration) {
        self.media.seek(target);
        self.current_time = target;
    }

    fn clamp_to_duration(&self, t: Duration) -> Duration {
        match self.duration {
            Some(d) => t.min(d),
            None => t,
        }
    }

    fn change_track(&mut self, index: usize) {
        let resume = self.is_playing || self.pending_play.is_some();

        self.current = index;
        self.current_time = Duration::ZERO;
        self.duration = None;
        self.pending_play = None;
        self.started_play = None;
        self.generation = self.media.load(&self.tracks[index].audio);
        tracing::debug!(index, title = %self.tracks[index].title, resume, "changed track");

        if resume {
            self.request_play();
        }
    }
}
